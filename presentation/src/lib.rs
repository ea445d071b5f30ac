//! Presentation layer for case-council
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive clinician prompt.

pub mod cli;
pub mod intervention;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputArg};
pub use intervention::human_intervention::ConsoleClinician;
pub use output::console::{ConsoleFormatter, ScenarioOutcome};
pub use progress::capture::VerdictCapture;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
