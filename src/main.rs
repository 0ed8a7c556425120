use crate::config::Config;
use crate::db::{init_db, Database};
use crate::geocoder::{Geocoder, PlacesClient};
use crate::router::{handle, AppState};
use crate::store::ReviewStore;
use astra::Server;
use clap::Parser;

mod config;
mod db;
mod domain;
mod errors;
mod geocoder;
mod logging;
mod responses;
mod router;
mod spreadsheets;
mod store;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let config = Config::parse();
    logging::init(config.debug);

    // 1️⃣ Create the database handle for the place cache
    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db) {
        tracing::error!(error = %e, "Database initialization failed");
        std::process::exit(1);
    }

    // 2️⃣ Geocoder: Places client behind the keyed cache
    let client = match PlacesClient::new(config.places()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Places client init failed");
            std::process::exit(1);
        }
    };
    if config.places_api_key.is_none() {
        tracing::warn!(
            fallback = %config.fallback_city,
            "GOOGLE_PLACES_API_KEY not set; unresolved places use the fallback city"
        );
    }
    let geocoder = Geocoder::new(client, config.fallback_city.clone()).with_store(db);

    let state = AppState {
        source: config.source.clone(),
        default_locations: config.default_locations.clone(),
        store: ReviewStore::new(Box::new(geocoder), config.brand_map()),
    };

    // 3️⃣ Warm the cache so the first page view is not the slow one
    if let Err(e) = state.store.load(&state.source, chrono::Local::now().date_naive()) {
        tracing::error!(error = %e, "Initial review load failed; will retry on request");
    }

    // 4️⃣ Start the server
    tracing::info!(addr = %config.bind, source = %config.source.display(), "Starting server");

    let server = Server::bind(&config.bind).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => {
            tracing::warn!(error = %err, "Request failed");
            responses::html_error_response(err)
        }
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "Server ended with error");
    }

    tracing::info!("Server shut down cleanly.");
}
