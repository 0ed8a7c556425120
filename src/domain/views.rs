// src/domain/views.rs
//
// Aggregations over the enriched table. Every view takes the selected
// locations explicitly; an empty selection matches nothing.

use crate::domain::review::Review;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Reviews at or below this rating are highlighted.
pub const LOW_SCORE_MAX: u8 = 3;

pub const RATING_LEVELS: [u8; 5] = [1, 2, 3, 4, 5];

/// The user's selected cities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locations(BTreeSet<String>);

impl Locations {
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(cities.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, city: &str) -> bool {
        self.0.contains(city)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealershipRating {
    pub name: String,
    pub mean_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingCount {
    pub brand: String,
    pub review_rating: u8,
    pub count: usize,
}

/// One brand's recent ratings as shares of 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandDistribution {
    pub brand: String,
    pub total: usize,
    /// (rating, count, percent) for ratings 1..=5, zero-count levels included.
    pub shares: Vec<(u8, usize, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowScoreReview {
    pub name: String,
    pub review_text: Option<String>,
    pub owner_answer: Option<String>,
    pub review_rating: u8,
    pub review_datetime: NaiveDate,
}

fn in_locations<'a>(
    rows: &'a [Review],
    locations: &'a Locations,
) -> impl Iterator<Item = &'a Review> + 'a {
    rows.iter().filter(move |r| locations.contains(&r.city))
}

/// Mean dealership rating per dealership name for one brand, lowest first.
/// Rows without a rating do not count toward the mean; a dealership with no
/// rating at all is left out.
pub fn rating_by_dealership(
    rows: &[Review],
    brand: &str,
    locations: &Locations,
) -> Vec<DealershipRating> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in in_locations(rows, locations).filter(|r| r.brand == brand) {
        if let Some(rating) = row.rating {
            let entry = groups.entry(row.name.as_str()).or_insert((0.0, 0));
            entry.0 += rating;
            entry.1 += 1;
        }
    }

    let mut out: Vec<DealershipRating> = groups
        .into_iter()
        .map(|(name, (sum, n))| DealershipRating {
            name: name.to_string(),
            mean_rating: sum / n as f64,
        })
        .collect();

    // Stable: equal means keep name order.
    out.sort_by(|a, b| a.mean_rating.total_cmp(&b.mean_rating));
    out
}

/// Recent review counts per (brand, rating). Brands descending, ratings ascending.
pub fn rating_distribution(rows: &[Review], locations: &Locations) -> Vec<RatingCount> {
    let mut counts: BTreeMap<(&str, u8), usize> = BTreeMap::new();
    for row in in_locations(rows, locations).filter(|r| r.within_three_months) {
        if let Some(star) = row.review_rating {
            *counts.entry((row.brand.as_str(), star)).or_insert(0) += 1;
        }
    }

    let mut out: Vec<RatingCount> = counts
        .into_iter()
        .map(|((brand, review_rating), count)| RatingCount {
            brand: brand.to_string(),
            review_rating,
            count,
        })
        .collect();

    out.sort_by(|a, b| {
        b.brand
            .cmp(&a.brand)
            .then(a.review_rating.cmp(&b.review_rating))
    });
    out
}

/// Recent review counts per rating for one brand, highest rating first.
pub fn rating_distribution_pie(
    rows: &[Review],
    brand: &str,
    locations: &Locations,
) -> Vec<(u8, usize)> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    let recent = in_locations(rows, locations)
        .filter(|r| r.within_three_months && r.brand == brand);
    for star in recent.filter_map(|r| r.review_rating) {
        *counts.entry(star).or_insert(0) += 1;
    }
    counts.into_iter().rev().collect()
}

/// `rating_distribution` normalised to 100% per brand, in the same brand order.
pub fn normalized_distribution(rows: &[Review], locations: &Locations) -> Vec<BrandDistribution> {
    let mut out: Vec<BrandDistribution> = Vec::new();

    for count in rating_distribution(rows, locations) {
        if out.last().map(|d| d.brand != count.brand).unwrap_or(true) {
            out.push(BrandDistribution {
                brand: count.brand.clone(),
                total: 0,
                shares: RATING_LEVELS.iter().map(|&r| (r, 0, 0.0)).collect(),
            });
        }
        if let Some(dist) = out.last_mut() {
            dist.total += count.count;
            if let Some(share) = dist.shares.iter_mut().find(|s| s.0 == count.review_rating) {
                share.1 = count.count;
            }
        }
    }

    for dist in &mut out {
        let total = dist.total as f64;
        for share in &mut dist.shares {
            share.2 = share.1 as f64 * 100.0 / total;
        }
    }

    out
}

/// Reviews rated 3 or lower for one brand, most recent first.
pub fn low_score_reviews(rows: &[Review], brand: &str, locations: &Locations) -> Vec<LowScoreReview> {
    let mut out: Vec<LowScoreReview> = in_locations(rows, locations)
        .filter(|r| r.brand == brand)
        .filter_map(|r| {
            let star = r.review_rating.filter(|&s| s <= LOW_SCORE_MAX)?;
            Some(LowScoreReview {
                name: r.name.clone(),
                review_text: r.review_text.clone(),
                owner_answer: r.owner_answer.clone(),
                review_rating: star,
                review_datetime: r.review_datetime,
            })
        })
        .collect();

    out.sort_by(|a, b| b.review_datetime.cmp(&a.review_datetime));
    out
}
