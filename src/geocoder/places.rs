// places.rs
use crate::geocoder::models::PlaceDetailsResponse;
use crate::geocoder::GeocodeError;
use rand::Rng;
use reqwest::blocking::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("review-dashboard/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_PLACES_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/place/details/json";

/// Something that can turn a place id into a formatted address.
pub trait PlaceLookup: Send + Sync {
    fn formatted_address(&self, place_id: &str) -> Result<String, GeocodeError>;
}

#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub language: String,
    pub timeout: Duration,
    /// Total attempts per lookup, including the first.
    pub max_attempts: u32,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PLACES_ENDPOINT.to_string(),
            api_key: None,
            language: "en-TW".to_string(),
            timeout: Duration::from_secs(10),
            max_attempts: 2,
        }
    }
}

/// Blocking client for the Place Details endpoint.
pub struct PlacesClient {
    client: Client,
    config: PlacesConfig,
}

impl PlacesClient {
    pub fn new(config: PlacesConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn fetch_with_retry(&self, place_id: &str) -> Result<String, GeocodeError> {
        const MAX_BACKOFF_MILLIS: u64 = 2_000;
        const JITTER_MAX_MILLIS: u64 = 250;

        let attempts = self.config.max_attempts.max(1);
        let mut last_err = None;

        for attempt in 1..=attempts {
            let start = std::time::Instant::now();

            match self.try_formatted_address(place_id) {
                Ok(address) => {
                    tracing::debug!(place_id, attempt, elapsed = ?start.elapsed(), "Place lookup succeeded");
                    return Ok(address);
                }
                Err(e) => {
                    tracing::warn!(place_id, attempt, elapsed = ?start.elapsed(), error = %e, "Place lookup failed");

                    let transient = e.is_transient();
                    last_err = Some(e);

                    if !transient || attempt == attempts {
                        break;
                    }

                    // backoff
                    let base = std::cmp::min(500 * attempt as u64, MAX_BACKOFF_MILLIS);
                    let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_MILLIS);
                    std::thread::sleep(Duration::from_millis(base + jitter));
                }
            }
        }

        Err(last_err.unwrap_or_else(|| GeocodeError::Network("place lookup retry loop failed".into())))
    }

    fn try_formatted_address(&self, place_id: &str) -> Result<String, GeocodeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GeocodeError::Config("GOOGLE_PLACES_API_KEY is not set".into()))?;

        let resp = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("place_id", place_id),
                ("language", self.config.language.as_str()),
                ("key", api_key),
            ])
            .send()
            .map_err(|e| GeocodeError::Network(describe(&e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let text = resp
            .text()
            .map_err(|e| GeocodeError::Network(describe(&e)))?;

        let details: PlaceDetailsResponse =
            serde_json::from_str(&text).map_err(|e| GeocodeError::JsonParse(e.to_string()))?;

        let api_status = details.status.unwrap_or_else(|| "<none>".to_string());
        details
            .result
            .and_then(|r| r.formatted_address)
            .filter(|a| !a.trim().is_empty())
            .ok_or(GeocodeError::MissingAddress(api_status))
    }
}

impl PlaceLookup for PlacesClient {
    fn formatted_address(&self, place_id: &str) -> Result<String, GeocodeError> {
        self.fetch_with_retry(place_id)
    }
}

// The request URL carries the API key, so reqwest's own Display is not used.
fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        "connection failed".to_string()
    } else if e.is_decode() {
        "response body could not be decoded".to_string()
    } else {
        "request failed".to_string()
    }
}
