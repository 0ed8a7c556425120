pub mod brand;
pub mod enrichment;
pub mod review;
pub mod views;

pub use brand::BrandMap;
pub use enrichment::enrich;
pub use review::{RawReview, Review, ReviewTable};
pub use views::Locations;
