// src/domain/enrichment.rs

use crate::domain::brand::{classify_brand, BrandMap};
use crate::domain::review::{RawReview, Review, ReviewTable};
use crate::geocoder::CityResolver;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// Length of the recency window, in days.
pub const RECENT_WINDOW_DAYS: i64 = 90;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Date assigned to reviews whose own date is missing or unparseable.
pub fn fallback_review_date(today: NaiveDate) -> NaiveDate {
    today - Duration::days(RECENT_WINDOW_DAYS)
}

/// Parse a review timestamp down to a calendar date. Time of day is dropped.
pub fn parse_review_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Build the enriched table from raw rows.
///
/// Cities are resolved once per distinct place id, in first-seen order.
/// The input is never modified; with the same rows, brand map, resolver
/// answers and `today`, the output is identical.
pub fn enrich(
    raw: &[RawReview],
    brands: &BrandMap,
    resolver: &dyn CityResolver,
    today: NaiveDate,
) -> ReviewTable {
    let mut cities: HashMap<&str, String> = HashMap::new();
    for row in raw {
        if !cities.contains_key(row.place_id.as_str()) {
            let city = resolver.resolve_city(&row.place_id);
            cities.insert(row.place_id.as_str(), city);
        }
    }

    tracing::debug!(
        rows = raw.len(),
        places = cities.len(),
        "Resolved cities for review source"
    );

    let fallback_date = fallback_review_date(today);
    let mut undated = 0usize;

    let rows = raw
        .iter()
        .map(|row| {
            let review_datetime = row
                .review_datetime
                .as_deref()
                .and_then(parse_review_date)
                .unwrap_or_else(|| {
                    undated += 1;
                    fallback_date
                });

            let date_difference = (today - review_datetime).num_days();

            Review {
                name: row.name.clone(),
                place_id: row.place_id.clone(),
                reviews: row.reviews,
                rating: row.rating,
                review_text: row.review_text.clone(),
                owner_answer: row.owner_answer.clone(),
                owner_answer_timestamp: row.owner_answer_timestamp.clone(),
                review_rating: row.review_rating,
                review_datetime,
                review_likes: row.review_likes,
                city: cities
                    .get(row.place_id.as_str())
                    .cloned()
                    .unwrap_or_else(|| resolver.fallback_city().to_string()),
                brand: classify_brand(&row.name, brands).to_string(),
                date_difference,
                within_three_months: date_difference <= RECENT_WINDOW_DAYS,
            }
        })
        .collect::<Vec<_>>();

    if undated > 0 {
        tracing::info!(
            undated,
            fallback = %fallback_date,
            "Reviews without a usable date were assigned the fallback date"
        );
    }

    ReviewTable { rows, as_of: today }
}
