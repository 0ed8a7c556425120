use crate::domain::views::{
    low_score_reviews, normalized_distribution, rating_by_dealership, rating_distribution,
    rating_distribution_pie, BrandDistribution, DealershipRating, LowScoreReview, RatingCount,
};
use crate::domain::{Locations, ReviewTable};
use crate::errors::ServerError;
use crate::responses::{html_response, json_response, see_other, xlsx_response, ResultResp};
use crate::spreadsheets::export_low_score_xlsx;
use crate::store::ReviewStore;
use crate::templates::pages::{
    highlighted_page, overview_page, BrandPanel, HighlightedVm, OverviewVm,
};
use astra::Request;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use url::form_urlencoded;

/// Everything a request needs. Shared by all server workers.
pub struct AppState {
    pub source: PathBuf,
    pub default_locations: Vec<String>,
    pub store: ReviewStore,
}

impl AppState {
    fn table(&self) -> Result<Arc<ReviewTable>, ServerError> {
        self.store.load(&self.source, today())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let query = Query::parse(req.uri().query());

    tracing::debug!(method, path, "Request");

    match (method, path) {
        ("GET", "/") => overview(state, &query),
        ("GET", "/reviews") => highlighted(state, &query),
        ("GET", "/reviews/export") => export(state, &query),
        ("GET", "/api/summary") => summary(state, &query),
        ("POST", "/reload") => {
            if query.get("places").is_some() {
                state.store.forget_places();
            }
            state.store.invalidate(&state.source);
            see_other("/")
        }
        _ => Err(ServerError::NotFound),
    }
}

fn overview(state: &AppState, query: &Query) -> ResultResp {
    let table = state.table()?;
    let selected = query.locations(&state.default_locations);

    let panels = state
        .store
        .brands()
        .labels()
        .into_iter()
        .map(|brand| BrandPanel {
            ratings: rating_by_dealership(&table.rows, &brand, &selected),
            recent: rating_distribution_pie(&table.rows, &brand, &selected),
            brand,
        })
        .collect();

    let vm = OverviewVm {
        cities: table.cities(),
        distribution: normalized_distribution(&table.rows, &selected),
        selected,
        panels,
        as_of: table.as_of,
        total_reviews: table.len(),
    };

    html_response(overview_page(&vm))
}

fn highlighted(state: &AppState, query: &Query) -> ResultResp {
    let table = state.table()?;
    let selected = query.locations(&state.default_locations);
    let brand = query.brand(state)?;

    let vm = HighlightedVm {
        cities: table.cities(),
        brands: state.store.brands().labels(),
        reviews: low_score_reviews(&table.rows, &brand, &selected),
        query: selection_query(&brand, &selected),
        selected,
        brand,
    };

    html_response(highlighted_page(&vm))
}

fn export(state: &AppState, query: &Query) -> ResultResp {
    let table = state.table()?;
    let selected = query.locations(&state.default_locations);
    let brand = query.brand(state)?;

    let reviews = low_score_reviews(&table.rows, &brand, &selected);
    let buffer = export_low_score_xlsx(&reviews)?;

    tracing::info!(brand = %brand, rows = reviews.len(), "Exported highlighted reviews");
    xlsx_response(buffer, &format!("low_score_reviews_{}.xlsx", file_safe(&brand)))
}

#[derive(Serialize)]
struct Summary {
    as_of: NaiveDate,
    locations: Vec<String>,
    brand: String,
    dealership_ratings: Vec<DealershipRating>,
    rating_counts: Vec<RatingCount>,
    distribution: Vec<BrandDistribution>,
    recent_ratings: Vec<(u8, usize)>,
    low_score_reviews: Vec<LowScoreReview>,
}

/// The views behind both pages for one brand, as JSON.
fn summary(state: &AppState, query: &Query) -> ResultResp {
    let table = state.table()?;
    let selected = query.locations(&state.default_locations);
    let brand = query.brand(state)?;

    let summary = Summary {
        as_of: table.as_of,
        locations: selected.iter().cloned().collect(),
        dealership_ratings: rating_by_dealership(&table.rows, &brand, &selected),
        rating_counts: rating_distribution(&table.rows, &selected),
        distribution: normalized_distribution(&table.rows, &selected),
        recent_ratings: rating_distribution_pie(&table.rows, &brand, &selected),
        low_score_reviews: low_score_reviews(&table.rows, &brand, &selected),
        brand,
    };

    json_response(&summary)
}

fn selection_query(brand: &str, locations: &Locations) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("filtered", "1");
    serializer.append_pair("brand", brand);
    for city in locations.iter() {
        serializer.append_pair("location", city);
    }
    serializer.finish()
}

fn file_safe(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// Decoded query-string pairs, repeats preserved.
struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    fn parse(raw: Option<&str>) -> Self {
        let pairs = raw
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        Self { pairs }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// No `location` and no `filtered` marker means a first visit: use the
    /// defaults. Otherwise exactly the listed locations, possibly none.
    fn locations(&self, defaults: &[String]) -> Locations {
        let chosen = self.get_all("location");
        if chosen.is_empty() && self.get("filtered").is_none() {
            Locations::new(defaults.iter().cloned())
        } else {
            Locations::new(chosen)
        }
    }

    fn brand(&self, state: &AppState) -> Result<String, ServerError> {
        let brands = state.store.brands();
        match self.get("brand") {
            Some(b) if brands.contains_label(b) => Ok(b.to_string()),
            Some(b) => Err(ServerError::BadRequest(format!("Unknown brand '{b}'"))),
            None => brands
                .labels()
                .into_iter()
                .next()
                .ok_or(ServerError::InternalError),
        }
    }
}
