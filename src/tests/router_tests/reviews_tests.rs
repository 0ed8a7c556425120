use super::{get, make_state};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::read_body;

#[test]
fn highlighted_reviews_default_to_first_brand() {
    let (_dir, state) = make_state();

    let mut resp = handle(get("/reviews"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = read_body(&mut resp);

    assert!(body.contains("Highlighted Reviews"));
    assert!(body.contains("We are sorry, please contact us"));
    assert!(body.contains("2 reviews"));
    // The 5-star review is not highlighted.
    assert!(!body.contains("5 star visit"));

    // Most recent first: the 3-day-old review precedes the 30-day-old one.
    let taipei = body.find("2 star visit at Audi Taipei").unwrap();
    let banqiao = body.find("1 star visit at Audi Banqiao").unwrap();
    assert!(taipei < banqiao);
}

#[test]
fn highlighted_reviews_per_brand() {
    let (_dir, state) = make_state();

    let mut resp = handle(get("/reviews?brand=BMW"), &state).unwrap();
    let body = read_body(&mut resp);

    assert!(body.contains("3 star visit at BMW Neihu"));
    assert!(body.contains("1 reviews"));
}

#[test]
fn unknown_brand_is_bad_request() {
    let (_dir, state) = make_state();

    match handle(get("/reviews?brand=Lexus"), &state) {
        Err(ServerError::BadRequest(msg)) => assert!(msg.contains("Lexus")),
        Err(other) => panic!("expected BadRequest, got {other}"),
        Ok(resp) => panic!("expected an error, got status {}", resp.status()),
    }
}
