mod export_tests;
mod overview_tests;
mod reviews_tests;
mod summary_tests;

use crate::domain::BrandMap;
use crate::router::AppState;
use crate::store::ReviewStore;
use crate::tests::utils::{days_ago, raw_review, write_reviews_xlsx, FakeResolver};
use astra::{Body, Request};
use chrono::Local;

/// App state over a small review export in a temp dir. Keep the TempDir
/// alive for the duration of the test.
pub fn make_state() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("complete_review.xlsx");
    let today = Local::now().date_naive();

    let mut answered = raw_review("Audi Taipei", "p-audi-tpe", 4.0, 2, Some(&days_ago(today, 3)));
    answered.owner_answer = Some("We are sorry, please contact us".to_string());

    write_reviews_xlsx(
        &source,
        &[
            raw_review("Audi Taipei", "p-audi-tpe", 4.0, 5, Some(&days_ago(today, 10))),
            answered,
            raw_review("Audi Banqiao", "p-audi-bq", 3.2, 1, Some(&days_ago(today, 30))),
            raw_review("Audi Taoyuan", "p-audi-ty", 2.5, 1, Some(&days_ago(today, 5))),
            raw_review("BMW Neihu", "p-bmw-nh", 4.6, 4, Some(&days_ago(today, 200))),
            raw_review("BMW Neihu", "p-bmw-nh", 4.6, 3, None),
            raw_review("Mercedes Xinyi", "p-benz-xy", 4.8, 5, Some(&days_ago(today, 1))),
        ],
    );

    let resolver = FakeResolver::new(&[
        ("p-audi-tpe", "Taipei City"),
        ("p-audi-bq", "New Taipei City"),
        ("p-bmw-nh", "Taipei City"),
        ("p-benz-xy", "Taipei City"),
    ]);

    let state = AppState {
        source,
        default_locations: vec!["Taipei City".to_string(), "New Taipei City".to_string()],
        store: ReviewStore::new(Box::new(resolver), BrandMap::default()),
    };
    (dir, state)
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post(uri: &str) -> Request {
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
