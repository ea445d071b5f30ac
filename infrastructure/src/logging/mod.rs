//! Logging infrastructure: the per-run JSONL event record.
//!
//! Provides [`JsonlEventLogger`], a JSONL file writer that implements
//! the [`DeliberationLogger`](council_application::DeliberationLogger) port.

mod event_log;

pub use event_log::JsonlEventLogger;
