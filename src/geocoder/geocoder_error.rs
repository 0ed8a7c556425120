use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum GeocodeError {
    Config(String),
    Network(String),
    Status(u16),
    JsonParse(String),
    MissingAddress(String),
}

impl GeocodeError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, GeocodeError::Network(_) | GeocodeError::Status(_))
    }
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::Config(msg) => write!(f, "Geocoder misconfigured: {msg}"),
            GeocodeError::Network(msg) => write!(f, "Network error: {msg}"),
            GeocodeError::Status(code) => write!(f, "Place details HTTP {code}"),
            GeocodeError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            GeocodeError::MissingAddress(status) => {
                write!(f, "No formatted address in response (status {status})")
            }
        }
    }
}

impl Error for GeocodeError {}
