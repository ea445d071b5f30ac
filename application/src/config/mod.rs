//! Application-level configuration.
//!
//! - [`RunConfig`] - per-run parameters (rounds, panel, retries, grounding)

pub mod run_config;

pub use run_config::RunConfig;
