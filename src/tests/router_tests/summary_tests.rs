use super::{get, make_state};
use crate::router::handle;
use crate::tests::utils::read_body;
use serde_json::Value;

#[test]
fn summary_exposes_views_as_json() {
    let (_dir, state) = make_state();

    let mut resp = handle(get("/api/summary?brand=Audi"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/json"
    );

    let json: Value = serde_json::from_str(&read_body(&mut resp)).unwrap();
    assert_eq!(json["brand"], "Audi");
    assert_eq!(json["locations"], serde_json::json!(["New Taipei City", "Taipei City"]));

    let ratings = json["dealership_ratings"].as_array().unwrap();
    assert_eq!(ratings.len(), 2);
    assert_eq!(ratings[0]["name"], "Audi Banqiao");
    assert_eq!(ratings[1]["mean_rating"], 4.0);

    assert_eq!(json["low_score_reviews"].as_array().unwrap().len(), 2);
}

#[test]
fn empty_selection_gives_empty_json_views() {
    let (_dir, state) = make_state();

    let mut resp = handle(get("/api/summary?filtered=1"), &state).unwrap();
    let json: Value = serde_json::from_str(&read_body(&mut resp)).unwrap();

    for key in ["dealership_ratings", "rating_counts", "distribution", "recent_ratings", "low_score_reviews"] {
        assert_eq!(json[key].as_array().unwrap().len(), 0, "{key}");
    }
}
