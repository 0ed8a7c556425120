// spreadsheets/review_source.rs
//
// Reads the scraped review export. The first sheet (or the csv file) must
// have a header row naming at least the columns in REQUIRED_COLUMNS; any
// other columns are ignored.

use crate::domain::RawReview;
use crate::errors::ServerError;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use std::collections::HashMap;
use std::path::Path;

pub const REQUIRED_COLUMNS: [&str; 10] = [
    "name",
    "place_id",
    "reviews",
    "rating",
    "review_text",
    "owner_answer",
    "owner_answer_timestamp_datetime_utc",
    "review_rating",
    "review_datetime_utc",
    "review_likes",
];

/// Header row plus cell text, independent of the file format.
struct SourceTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

pub fn load_raw_reviews(path: &Path) -> Result<Vec<RawReview>, ServerError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let table = if is_csv {
        read_csv(path)?
    } else {
        read_workbook(path)?
    };

    let reviews = table_to_reviews(&table)?;
    tracing::info!(
        path = %path.display(),
        rows = table.rows.len(),
        kept = reviews.len(),
        "Review source read"
    );
    Ok(reviews)
}

fn read_workbook(path: &Path) -> Result<SourceTable, ServerError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ServerError::SourceError(format!("{}: {e}", path.display())))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ServerError::SourceError(format!("{}: workbook has no sheets", path.display())))?
        .map_err(|e| ServerError::SourceError(format!("{}: {e}", path.display())))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|c| cell_text(c).unwrap_or_default())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let rows = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(SourceTable { headers, rows })
}

fn read_csv(path: &Path) -> Result<SourceTable, ServerError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| ServerError::SourceError(format!("{}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| ServerError::SourceError(format!("{}: {e}", path.display())))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| ServerError::SourceError(format!("{}: {e}", path.display())))?;
        rows.push(record.iter().map(non_empty).collect());
    }

    Ok(SourceTable { headers, rows })
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => non_empty(s),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string()),
    }
}

fn table_to_reviews(table: &SourceTable) -> Result<Vec<RawReview>, ServerError> {
    let index: HashMap<&str, usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim(), i))
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !index.contains_key(c))
        .collect();
    if !missing.is_empty() {
        return Err(ServerError::SourceError(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut out = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        // +2: one for the header row, one for 1-based numbering.
        let line = i + 2;
        let get = |column: &str| -> Option<String> {
            index
                .get(column)
                .and_then(|&c| row.get(c))
                .and_then(|v| v.clone())
        };

        match row_to_review(&get, line) {
            Ok(review) => out.push(review),
            Err(reason) => tracing::warn!(line, reason, "Skipping review row"),
        }
    }

    Ok(out)
}

/// Only `name` and `place_id` are mandatory. A dealership that has no reviews
/// yet still appears with its aggregate `rating` and an empty `review_rating`.
fn row_to_review(
    get: &dyn Fn(&str) -> Option<String>,
    line: usize,
) -> Result<RawReview, &'static str> {
    let name = get("name").ok_or("missing name")?;
    let place_id = get("place_id").ok_or("missing place_id")?;

    let review_rating = get("review_rating").and_then(|v| {
        let star = parse_number(&v).filter(|r| r.fract() == 0.0 && (1.0..=5.0).contains(r));
        if star.is_none() {
            tracing::warn!(line, value = %v, "Ignoring review_rating outside 1-5");
        }
        star.map(|r| r as u8)
    });

    Ok(RawReview {
        name,
        place_id,
        reviews: get("reviews")
            .and_then(|v| parse_number(&v))
            .map(|n| n as i64)
            .unwrap_or(0),
        rating: get("rating").and_then(|v| parse_number(&v)),
        review_text: get("review_text"),
        owner_answer: get("owner_answer"),
        owner_answer_timestamp: get("owner_answer_timestamp_datetime_utc"),
        review_rating,
        review_datetime: get("review_datetime_utc"),
        review_likes: get("review_likes")
            .and_then(|v| parse_number(&v))
            .map(|n| n as i64)
            .unwrap_or(0),
    })
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
