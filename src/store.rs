// store.rs
//
// Memoizes the enriched table per source path. A path is read and geocoded
// once per process until it is invalidated.

use crate::domain::{enrich, BrandMap, ReviewTable};
use crate::errors::ServerError;
use crate::geocoder::CityResolver;
use crate::spreadsheets::load_raw_reviews;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// One source path's table. Its lock is held for the whole build, so
/// concurrent first loads wait for a single read and geocoding pass.
type Slot = Arc<Mutex<Option<Arc<ReviewTable>>>>;

pub struct ReviewStore {
    resolver: Box<dyn CityResolver>,
    brands: BrandMap,
    tables: Mutex<HashMap<PathBuf, Slot>>,
}

impl ReviewStore {
    pub fn new(resolver: Box<dyn CityResolver>, brands: BrandMap) -> Self {
        Self {
            resolver,
            brands,
            tables: Mutex::new(HashMap::new()),
        }
    }

    pub fn brands(&self) -> &BrandMap {
        &self.brands
    }

    /// The enriched table for `path`, built on first use.
    ///
    /// `today` only matters for a build; a cached table keeps the date it
    /// was built with (see `ReviewTable::as_of`).
    pub fn load(&self, path: &Path, today: NaiveDate) -> Result<Arc<ReviewTable>, ServerError> {
        let slot = Arc::clone(self.tables().entry(path.to_path_buf()).or_default());
        let mut built = lock(&slot);
        if let Some(table) = built.as_ref() {
            return Ok(Arc::clone(table));
        }

        let raw = load_raw_reviews(path)?;
        let table = Arc::new(enrich(&raw, &self.brands, self.resolver.as_ref(), today));

        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            as_of = %table.as_of,
            "Review table built"
        );

        *built = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table for one path. Returns whether one was cached.
    pub fn invalidate(&self, path: &Path) -> bool {
        let slot = self.tables().remove(path);
        let removed = slot.as_ref().is_some_and(is_built);
        tracing::info!(path = %path.display(), removed, "Review table invalidated");
        removed
    }

    /// Also forget resolved cities, so the next build geocodes again.
    pub fn forget_places(&self) {
        self.resolver.invalidate();
    }

    pub fn is_cached(&self, path: &Path) -> bool {
        let slot = self.tables().get(path).cloned();
        slot.as_ref().is_some_and(is_built)
    }

    fn tables(&self) -> MutexGuard<'_, HashMap<PathBuf, Slot>> {
        lock(&self.tables)
    }
}

fn is_built(slot: &Slot) -> bool {
    lock(slot).is_some()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
