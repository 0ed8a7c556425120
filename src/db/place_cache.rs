// db/place_cache.rs
use crate::db::connection::Database;
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension};

pub fn get_place_city(db: &Database, place_id: &str) -> Result<Option<String>, ServerError> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT city FROM place_cities WHERE place_id = ?1",
            params![place_id],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(e.to_string()))
    })
}

pub fn save_place_city(
    db: &Database,
    place_id: &str,
    city: &str,
    resolved_at: NaiveDateTime,
) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO place_cities (place_id, city, resolved_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(place_id) DO UPDATE SET
              city = excluded.city,
              resolved_at = excluded.resolved_at
            "#,
            params![place_id, city, resolved_at],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })
}

pub fn clear_place_cities(db: &Database) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM place_cities", [])
            .map_err(|e| ServerError::DbError(e.to_string()))
    })
}

pub fn count_place_cities(db: &Database) -> Result<i64, ServerError> {
    db.with_conn(|conn| {
        conn.query_row("SELECT COUNT(*) FROM place_cities", [], |row| row.get(0))
            .map_err(|e| ServerError::DbError(e.to_string()))
    })
}
