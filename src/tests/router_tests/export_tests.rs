use super::{get, make_state};
use crate::router::handle;
use calamine::{Data, Reader, Xlsx};
use std::io::{Cursor, Read};

#[test]
fn export_returns_highlighted_rows_as_xlsx() {
    let (_dir, state) = make_state();

    let mut resp = handle(
        get("/reviews/export?filtered=1&brand=Audi&location=Taipei+City"),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        resp.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"low_score_reviews_Audi.xlsx\""
    );

    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();

    let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    let rows: Vec<_> = range.rows().collect();

    // Header plus the single low-score Audi review in Taipei City.
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], Data::String("Dealership".to_string()));
    assert_eq!(rows[1][0], Data::String("Audi Taipei".to_string()));
    assert_eq!(rows[1][3], Data::Float(2.0));
}
