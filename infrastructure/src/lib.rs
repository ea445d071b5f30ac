//! Infrastructure layer for case-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and case-file loading.

pub mod case_file;
pub mod config;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use case_file::{CaseFileError, CaseFileLoader};
pub use config::{
    ConfigLoader, FileConfig, FileCouncilConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileProviderConfig,
};
pub use gemini::{GeminiClient, ProviderHttpError};
pub use logging::JsonlEventLogger;
