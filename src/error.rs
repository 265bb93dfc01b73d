use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Missing required setting `{0}`")]
    MissingConfig(&'static str),

    #[error("Store rejected request ({status}): {message}")]
    Store { status: u16, message: String },

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Unauthorized - check the store service key")]
    Unauthorized,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
