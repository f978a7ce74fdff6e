use thiserror::Error;

#[derive(Debug, Error)]
pub enum RealtorError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Listing API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Decode(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
