// src/domain/review.rs

use chrono::NaiveDate;

/// One review row as read from the source spreadsheet, restricted to the
/// columns the dashboard uses. Nothing here is derived yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReview {
    pub name: String,
    pub place_id: String,
    pub reviews: i64,
    pub rating: Option<f64>,
    pub review_text: Option<String>,
    pub owner_answer: Option<String>,
    pub owner_answer_timestamp: Option<String>,
    /// Empty for a dealership listed without any review.
    pub review_rating: Option<u8>,
    // Kept as text: unparseable values are resolved during enrichment.
    pub review_datetime: Option<String>,
    pub review_likes: i64,
}

/// A review after enrichment. `city` and `brand` are always populated.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub name: String,
    pub place_id: String,
    pub reviews: i64,
    pub rating: Option<f64>,
    pub review_text: Option<String>,
    pub owner_answer: Option<String>,
    pub owner_answer_timestamp: Option<String>,
    pub review_rating: Option<u8>,
    pub review_datetime: NaiveDate,
    pub review_likes: i64,

    pub city: String,
    pub brand: String,
    pub date_difference: i64,
    pub within_three_months: bool,
}

/// The enriched table for one source load. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewTable {
    pub rows: Vec<Review>,
    /// The "now" the recency columns were computed against.
    pub as_of: NaiveDate,
}

impl ReviewTable {
    /// Distinct cities in first-seen order, for the location selector.
    pub fn cities(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(r.city.as_str()))
            .map(|r| r.city.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
