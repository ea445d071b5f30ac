//! Generation client port
//!
//! Defines the interface for talking to a structured-generation provider.
//! Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use council_domain::Schema;
use thiserror::Error;

/// Transport or availability failure of the provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Response blocked by provider: {0}")]
    Blocked(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One call to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system: Option<String>,
    /// Output shape the provider is asked to honor
    pub schema: Option<Schema>,
    /// Ask for web-search grounding and cited sources
    pub grounded: bool,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            schema: None,
            grounded: false,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn grounded(mut self, grounded: bool) -> Self {
        self.grounded = grounded;
        self
    }
}

/// Source reference as reported by the provider, before resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCitation {
    pub title: Option<String>,
    pub uri: Option<String>,
}

/// Unprocessed provider output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGeneration {
    pub text: String,
    pub citations: Vec<RawCitation>,
}

impl RawGeneration {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }
}

/// Gateway to the generation provider
///
/// The core never sees transport details, authentication or rate limits.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<RawGeneration, ProviderError>;

    /// Provider name used in logs
    fn name(&self) -> &str {
        "provider"
    }
}
