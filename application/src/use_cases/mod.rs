//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod reanalyze_scenario;
pub mod run_deliberation;
pub mod run_registry;
pub mod structured;
pub mod synthesize_report;

#[cfg(test)]
pub(crate) mod test_support;
