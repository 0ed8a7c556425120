pub mod card;
pub mod charts;
pub mod location_form;

pub use card::card;
pub use charts::{rating_bars, rating_donut, stacked_distribution};
pub use location_form::location_form;
