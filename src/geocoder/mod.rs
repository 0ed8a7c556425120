mod geocoder;
mod geocoder_error;
mod models;
mod places;

pub use geocoder::{extract_city, CityResolver, Geocoder};
pub use geocoder_error::GeocodeError;
pub use places::{PlaceLookup, PlacesClient, PlacesConfig, DEFAULT_PLACES_ENDPOINT};
