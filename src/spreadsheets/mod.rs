pub mod export_xlsx;
pub mod review_source;

pub use export_xlsx::export_low_score_xlsx;
pub use review_source::load_raw_reviews;
