use crate::domain::{RawReview, Review};
use crate::geocoder::{CityResolver, GeocodeError, PlaceLookup};
use chrono::{Duration, NaiveDate};
use rust_xlsxwriter::Workbook;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const FALLBACK_CITY: &str = "Taoyuan City";

/// Resolver answering from a fixed table and counting calls.
pub struct FakeResolver {
    cities: HashMap<String, String>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeResolver {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            cities: pairs
                .iter()
                .map(|(p, c)| (p.to_string(), c.to_string()))
                .collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl CityResolver for FakeResolver {
    fn resolve_city(&self, place_id: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.cities
            .get(place_id)
            .cloned()
            .unwrap_or_else(|| FALLBACK_CITY.to_string())
    }

    fn fallback_city(&self) -> &str {
        FALLBACK_CITY
    }
}

/// Place lookup with canned addresses. Unknown ids fail like a dead network.
pub struct FakeLookup {
    addresses: HashMap<String, String>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeLookup {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            addresses: pairs
                .iter()
                .map(|(p, a)| (p.to_string(), a.to_string()))
                .collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl PlaceLookup for FakeLookup {
    fn formatted_address(&self, place_id: &str) -> Result<String, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.addresses
            .get(place_id)
            .cloned()
            .ok_or_else(|| GeocodeError::Network("connection failed".into()))
    }
}

pub fn raw_review(
    name: &str,
    place_id: &str,
    rating: f64,
    review_rating: u8,
    review_datetime: Option<&str>,
) -> RawReview {
    RawReview {
        name: name.to_string(),
        place_id: place_id.to_string(),
        reviews: 120,
        rating: Some(rating),
        review_text: Some(format!("{review_rating} star visit at {name}")),
        owner_answer: None,
        owner_answer_timestamp: None,
        review_rating: Some(review_rating),
        review_datetime: review_datetime.map(str::to_string),
        review_likes: 0,
    }
}

/// An already-enriched row, for exercising the views directly.
pub fn review(
    name: &str,
    brand: &str,
    city: &str,
    rating: f64,
    review_rating: u8,
    review_datetime: NaiveDate,
    today: NaiveDate,
) -> Review {
    let date_difference = (today - review_datetime).num_days();
    Review {
        name: name.to_string(),
        place_id: format!("place-{name}"),
        reviews: 120,
        rating: Some(rating),
        review_text: Some(format!("{review_rating} stars")),
        owner_answer: None,
        owner_answer_timestamp: None,
        review_rating: Some(review_rating),
        review_datetime,
        review_likes: 0,
        city: city.to_string(),
        brand: brand.to_string(),
        date_difference,
        within_three_months: date_difference <= 90,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn days_ago(today: NaiveDate, days: i64) -> String {
    (today - Duration::days(days))
        .format("%Y-%m-%d 10:30:00")
        .to_string()
}

/// Write rows in the scraped export's column layout, plus one extra column
/// the reader must ignore.
pub fn write_reviews_xlsx(path: &Path, rows: &[RawReview]) {
    let headers = [
        "name",
        "full_address",
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

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &row.name).unwrap();
        sheet.write_string(r, 1, "somewhere, Taiwan").unwrap();
        sheet.write_string(r, 2, &row.place_id).unwrap();
        sheet.write_number(r, 3, row.reviews as f64).unwrap();
        if let Some(rating) = row.rating {
            sheet.write_number(r, 4, rating).unwrap();
        }
        if let Some(text) = &row.review_text {
            sheet.write_string(r, 5, text).unwrap();
        }
        if let Some(answer) = &row.owner_answer {
            sheet.write_string(r, 6, answer).unwrap();
        }
        if let Some(star) = row.review_rating {
            sheet.write_number(r, 8, star as f64).unwrap();
        }
        if let Some(dt) = &row.review_datetime {
            sheet.write_string(r, 9, dt).unwrap();
        }
        sheet.write_number(r, 10, row.review_likes as f64).unwrap();
    }

    workbook.save(path).unwrap();
}

/// Serve exactly one HTTP response on a random local port.
/// Returns the endpoint URL.
pub fn serve_once(status_line: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let mut request = Vec::new();
            while let Ok(n) = stream.read(&mut buf) {
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{addr}/maps/api/place/details/json")
}

pub fn read_body(resp: &mut astra::Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    String::from_utf8(bytes).unwrap()
}
