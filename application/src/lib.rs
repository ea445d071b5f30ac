//! Application layer for case-council
//!
//! This crate contains use cases, port definitions, and run configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RunConfig;
pub use ports::{
    event_logger::{DeliberationLogger, NoDeliberationLogger},
    generation::{GenerationClient, GenerationRequest, ProviderError, RawCitation, RawGeneration},
    intervention::{InterventionError, InterventionGate, InterventionResponder, intervention_channel},
    progress::{CollectingSink, LoggedProgress, NoProgress, ProgressSink},
};
pub use use_cases::reanalyze_scenario::{ReanalysisError, ScenarioReanalyzer};
pub use use_cases::run_deliberation::{
    CompletedRun, DeliberationError, RunDeliberationInput, RunDeliberationUseCase,
};
pub use use_cases::run_registry::{AlreadyRunning, RunGuard, RunRegistry};
pub use use_cases::structured::{GenerationError, Generated, RetryPolicy, StructuredGenerator};
pub use use_cases::synthesize_report::{ReportSynthesizer, SynthesizedReport};
