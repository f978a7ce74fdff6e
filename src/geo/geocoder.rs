// geo/geocoder.rs
use crate::config::GeocodingConfig;
use crate::geo::Throttle;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Geocoder returned HTTP {0}")]
    Status(u16),
    #[error("Unreadable geocoder response: {0}")]
    Decode(String),
}

/// Turns a one-line postal address into a coordinate.
///
/// `Ok(None)` means the service answered but found nothing.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError>;
}

/// OpenStreetMap Nominatim `search` endpoint.
///
/// Nominatim's usage policy requires an identifying User-Agent and at most
/// one request per second. The throttle lives here so every worker sharing
/// this geocoder shares one limit.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    throttle: Throttle,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        Ok(Coordinate {
            latitude: parse_degrees("lat", &self.lat)?,
            longitude: parse_degrees("lon", &self.lon)?,
        })
    }
}

/// A finite decimal degree value; `NaN` and `inf` are rejected.
fn parse_degrees(field: &str, raw: &str) -> Result<f64, GeocodeError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| GeocodeError::Decode(format!("{field} '{raw}': {e}")))?;
    if !value.is_finite() {
        return Err(GeocodeError::Decode(format!("{field} '{raw}' is not finite")));
    }
    Ok(value)
}

impl NominatimGeocoder {
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            throttle: Throttle::new(config.min_interval),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        let waited = self.throttle.wait();
        debug!(%url, query, ?waited, "Geocoding address");

        let resp = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let places: Vec<NominatimPlace> = resp
            .json()
            .map_err(|e| GeocodeError::Decode(e.to_string()))?;

        places.first().map(NominatimPlace::coordinate).transpose()
    }
}
