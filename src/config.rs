// config.rs
//
// Every option can come from the command line or the environment.

use crate::domain::brand::{parse_brand_entry, BrandMap};
use crate::geocoder::{PlacesConfig, DEFAULT_PLACES_ENDPOINT};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "review_dashboard")]
#[command(about = "Dealership customer reviews dashboard", long_about = None)]
#[command(version)]
pub struct Config {
    /// Review export to load (.xlsx, .xls, .ods or .csv)
    #[arg(long, env = "REVIEWS_SOURCE", default_value = "complete_review.xlsx")]
    pub source: PathBuf,

    #[arg(long, env = "DASHBOARD_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// SQLite file holding resolved place cities
    #[arg(long, env = "DASHBOARD_DB", default_value = "reviews.sqlite3")]
    pub db_path: String,

    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true)]
    pub places_api_key: Option<String>,

    #[arg(long, env = "PLACES_ENDPOINT", default_value = DEFAULT_PLACES_ENDPOINT)]
    pub places_endpoint: String,

    #[arg(long, env = "PLACES_LANGUAGE", default_value = "en-TW")]
    pub language: String,

    /// City used when a place cannot be resolved
    #[arg(long, env = "FALLBACK_CITY", default_value = "Taoyuan City")]
    pub fallback_city: String,

    #[arg(long, env = "GEOCODE_TIMEOUT_SECS", default_value_t = 10)]
    pub geocode_timeout_secs: u64,

    /// Attempts per place lookup, including the first
    #[arg(long, env = "GEOCODE_ATTEMPTS", default_value_t = 2)]
    pub geocode_attempts: u32,

    /// Brand rule as needle=Label, checked in the order given
    #[arg(long = "brand", value_parser = parse_brand_entry, default_values = ["Audi=Audi", "BMW=BMW"])]
    pub brands: Vec<(String, String)>,

    /// Brand for dealerships matching no rule
    #[arg(long, env = "CATCH_ALL_BRAND", default_value = "M-Benz")]
    pub catch_all_brand: String,

    /// Locations selected when the page is first opened
    #[arg(long = "default-location", default_values = ["Taipei City", "New Taipei City"])]
    pub default_locations: Vec<String>,

    #[arg(long)]
    pub debug: bool,
}

impl Config {
    pub fn brand_map(&self) -> BrandMap {
        BrandMap::new(self.brands.clone(), self.catch_all_brand.clone())
    }

    pub fn places(&self) -> PlacesConfig {
        PlacesConfig {
            endpoint: self.places_endpoint.clone(),
            api_key: self.places_api_key.clone(),
            language: self.language.clone(),
            timeout: Duration::from_secs(self.geocode_timeout_secs),
            max_attempts: self.geocode_attempts,
        }
    }
}
