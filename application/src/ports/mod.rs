//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! implement, plus the intervention gate shared between a run and its
//! clinician.

pub mod event_logger;
pub mod generation;
pub mod intervention;
pub mod progress;
