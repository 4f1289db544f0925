use reqwest::StatusCode;
use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no instrument found for ISIN {isin}")]
    InstrumentNotFound { isin: String },
    #[error("no resolution path for instrument kind {0}")]
    UnsupportedKind(String),
    #[error("instrument {isin} has no tradeable listings")]
    NoListings { isin: String },
    #[error("exchange {requested} not offered; available codes: {available:?}")]
    ExchangeNotFound {
        requested: String,
        available: Vec<String>,
    },
    #[error("GET {url} returned {status}: {body}")]
    Http {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    /// True when the failure means the requested instrument, listing set, or
    /// venue does not exist upstream, as opposed to a transport or shape fault.
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            AppError::InstrumentNotFound { .. }
                | AppError::NoListings { .. }
                | AppError::ExchangeNotFound { .. }
        )
    }
}
