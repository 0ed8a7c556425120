// geocoder.rs
use crate::db::connection::Database;
use crate::db::place_cache;
use crate::geocoder::PlaceLookup;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Resolves a place id to a city. Never fails: anything that goes wrong
/// yields the fallback city.
pub trait CityResolver: Send + Sync {
    fn resolve_city(&self, place_id: &str) -> String;

    fn fallback_city(&self) -> &str;

    /// Forget cached answers. Resolvers without a cache need not override.
    fn invalidate(&self) {}
}

/// First comma-separated address component naming a City or County.
pub fn extract_city(formatted_address: &str) -> Option<String> {
    formatted_address
        .split(',')
        .map(str::trim)
        .find(|part| part.contains("City") || part.contains("County"))
        .map(str::to_string)
}

/// Place-id keyed cache in front of a `PlaceLookup`.
///
/// Every answer (fallbacks included) is kept in memory for the life of the
/// process. Real matches are also written to SQLite when a database is
/// attached, so a restart does not repeat them.
pub struct Geocoder<L> {
    lookup: L,
    fallback_city: String,
    cache: Mutex<HashMap<String, String>>,
    store: Option<Database>,
}

impl<L: PlaceLookup> Geocoder<L> {
    pub fn new(lookup: L, fallback_city: impl Into<String>) -> Self {
        Self {
            lookup,
            fallback_city: fallback_city.into(),
            cache: Mutex::new(HashMap::new()),
            store: None,
        }
    }

    pub fn with_store(mut self, db: Database) -> Self {
        self.store = Some(db);
        self
    }

    pub fn cached_places(&self) -> usize {
        self.cache().len()
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn from_store(&self, place_id: &str) -> Option<String> {
        let db = self.store.as_ref()?;
        match place_cache::get_place_city(db, place_id) {
            Ok(city) => city,
            Err(e) => {
                tracing::warn!(place_id, error = %e, "Place cache read failed");
                None
            }
        }
    }

    fn save_to_store(&self, place_id: &str, city: &str) {
        if let Some(db) = &self.store {
            let now = Utc::now().naive_utc();
            if let Err(e) = place_cache::save_place_city(db, place_id, city, now) {
                tracing::warn!(place_id, error = %e, "Place cache write failed");
            }
        }
    }

    fn lookup_city(&self, place_id: &str) -> String {
        let address = match self.lookup.formatted_address(place_id) {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(place_id, error = %e, fallback = %self.fallback_city, "Using fallback city");
                return self.fallback_city.clone();
            }
        };

        match extract_city(&address) {
            Some(city) => {
                self.save_to_store(place_id, &city);
                city
            }
            None => {
                tracing::warn!(place_id, address = %address, fallback = %self.fallback_city, "No City/County in address");
                self.fallback_city.clone()
            }
        }
    }
}

impl<L: PlaceLookup> CityResolver for Geocoder<L> {
    fn resolve_city(&self, place_id: &str) -> String {
        if let Some(city) = self.cache().get(place_id) {
            tracing::debug!(place_id, city = %city, "Place cache hit");
            return city.clone();
        }

        let city = self
            .from_store(place_id)
            .unwrap_or_else(|| self.lookup_city(place_id));

        self.cache().insert(place_id.to_string(), city.clone());
        city
    }

    fn fallback_city(&self) -> &str {
        &self.fallback_city
    }

    /// Forget every cached answer, in memory and on disk.
    fn invalidate(&self) {
        let dropped = {
            let mut cache = self.cache();
            let n = cache.len();
            cache.clear();
            n
        };

        if let Some(db) = &self.store {
            if let Err(e) = place_cache::clear_place_cities(db) {
                tracing::warn!(error = %e, "Failed to clear persisted place cache");
            }
        }

        tracing::info!(dropped, "Place cache invalidated");
    }
}
