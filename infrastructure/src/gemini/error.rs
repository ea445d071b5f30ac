//! Error types for the Gemini adapter

use council_application::ProviderError;
use thiserror::Error;

/// Errors that can occur when talking to the `generateContent` endpoint
#[derive(Error, Debug)]
pub enum ProviderHttpError {
    #[error("No API key: set {0} or provider.api_key")]
    MissingApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Response blocked: {0}")]
    Blocked(String),
}

impl From<ProviderHttpError> for ProviderError {
    fn from(err: ProviderHttpError) -> Self {
        match err {
            ProviderHttpError::Request(e) if e.is_timeout() => ProviderError::Timeout,
            ProviderHttpError::Request(e) if e.is_connect() => {
                ProviderError::Connection(e.to_string())
            }
            ProviderHttpError::Request(e) => match e.status() {
                Some(status) => ProviderError::Status {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => ProviderError::Connection(e.to_string()),
            },
            ProviderHttpError::Status { status, message } => {
                ProviderError::Status { status, message }
            }
            ProviderHttpError::Parse(msg) => ProviderError::InvalidResponse(msg),
            ProviderHttpError::Blocked(reason) => ProviderError::Blocked(reason),
            other => ProviderError::Other(other.to_string()),
        }
    }
}
