//! Gemini-style `generateContent` adapter
//!
//! Implements the [`GenerationClient`](council_application::GenerationClient)
//! port over `reqwest`: schema-constrained JSON output via `responseSchema`,
//! grounding via the search tool, citations from `groundingMetadata`.

pub mod client;
pub mod error;
pub mod protocol;
pub mod schema;

pub use client::GeminiClient;
pub use error::ProviderHttpError;
