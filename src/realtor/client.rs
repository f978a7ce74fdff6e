// client.rs
use crate::config::RealtorConfig;
use crate::realtor::RealtorError;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingCategory {
    ForRent,
    ForSale,
}

impl ListingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingCategory::ForRent => "for rent",
            ListingCategory::ForSale => "for sale",
        }
    }

    /// Search endpoint path under the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            ListingCategory::ForRent => "search/forrent",
            ListingCategory::ForSale => "search/forsale",
        }
    }
}

/// Where listing payloads come from. The pipeline only ever sees the raw
/// JSON document, or an error meaning "no data for this category".
pub trait ListingSource: Send + Sync {
    fn search(&self, category: ListingCategory, location: &str) -> Result<Value, RealtorError>;
}

/// RapidAPI `realtor16` search client: one GET per category, no retries.
pub struct RealtorClient {
    client: Client,
    base_url: String,
    api_key: HeaderValue,
    api_host: HeaderValue,
    search_radius: String,
    limit: u32,
}

impl RealtorClient {
    pub fn new(config: &RealtorConfig) -> Result<Self, RealtorError> {
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| RealtorError::Config("API key is not a valid header value".into()))?;
        api_key.set_sensitive(true);
        let api_host = HeaderValue::from_str(&config.api_host)
            .map_err(|_| RealtorError::Config("API host is not a valid header value".into()))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RealtorError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            api_host,
            search_radius: config.search_radius.clone(),
            limit: config.limit,
        })
    }

    /// `GET {base}/search/{forrent|forsale}?location=&search_radius=&limit=`
    /// with the RapidAPI key and host headers.
    fn request(&self, category: ListingCategory, location: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, category.path());
        let limit = self.limit.to_string();

        self.client
            .get(url)
            .header("X-RapidAPI-Key", self.api_key.clone())
            .header("X-RapidAPI-Host", self.api_host.clone())
            .query(&[
                ("location", location),
                ("search_radius", self.search_radius.as_str()),
                ("limit", limit.as_str()),
            ])
    }
}

/// Non-2xx is `Status` with the body kept for the log; otherwise the body
/// must be JSON.
fn decode_response(status: StatusCode, text: String) -> Result<Value, RealtorError> {
    if !status.is_success() {
        return Err(RealtorError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    serde_json::from_str(&text).map_err(|e| RealtorError::Decode(e.to_string()))
}

impl ListingSource for RealtorClient {
    fn search(&self, category: ListingCategory, location: &str) -> Result<Value, RealtorError> {
        debug!(location, category = category.as_str(), "Requesting listings");

        let resp = self
            .request(category, location)
            .send()
            .map_err(|e| RealtorError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| RealtorError::Network(e.to_string()))?;
        let bytes = text.len();

        let payload = decode_response(status, text)?;

        info!(
            category = category.as_str(),
            location,
            bytes,
            "Listings received"
        );

        Ok(payload)
    }
}
