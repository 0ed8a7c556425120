use super::{get, make_state, post};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::read_body;

#[test]
fn overview_uses_default_locations() {
    let (_dir, state) = make_state();

    let mut resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = read_body(&mut resp);

    assert!(body.contains("Overall Ratings Comparison"));
    assert!(body.contains("Audi Taipei"));
    assert!(body.contains("Audi Banqiao"));
    // Taoyuan City is not selected by default.
    assert!(!body.contains("Audi Taoyuan"));
    // ...but it is offered in the selector.
    assert!(body.contains(r#"value="Taoyuan City""#));
}

#[test]
fn overview_follows_selected_locations() {
    let (_dir, state) = make_state();

    let mut resp = handle(get("/?filtered=1&location=Taoyuan+City"), &state).unwrap();
    let body = read_body(&mut resp);

    assert!(body.contains("Audi Taoyuan"));
    assert!(!body.contains("Audi Banqiao"));
}

#[test]
fn clearing_every_location_shows_nothing() {
    let (_dir, state) = make_state();

    let mut resp = handle(get("/?filtered=1"), &state).unwrap();
    let body = read_body(&mut resp);

    assert!(body.contains("No dealerships in the selected locations."));
    assert!(body.contains("No recent reviews in the selected locations."));
    assert!(!body.contains("Audi Taipei</span>"));
}

#[test]
fn reload_drops_the_cached_table() {
    let (_dir, state) = make_state();
    handle(get("/"), &state).unwrap();
    assert!(state.store.is_cached(&state.source));

    let resp = handle(post("/reload"), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/");
    assert!(!state.store.is_cached(&state.source));
}

#[test]
fn missing_source_is_an_error_page() {
    let (dir, state) = make_state();
    drop(dir);

    match handle(get("/"), &state) {
        Err(ServerError::SourceError(_)) => {}
        Err(other) => panic!("expected SourceError, got {other}"),
        Ok(resp) => panic!("expected an error, got status {}", resp.status()),
    }
}

#[test]
fn unknown_routes_are_not_found() {
    let (_dir, state) = make_state();
    assert!(matches!(
        handle(get("/admin"), &state),
        Err(ServerError::NotFound)
    ));
}
