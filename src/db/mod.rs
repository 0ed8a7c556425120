pub mod connection;
pub mod place_cache;

pub use connection::{init_db, Database};
