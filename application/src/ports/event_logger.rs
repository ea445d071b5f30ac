//! Port for the machine-readable deliberation record.
//!
//! This is separate from `tracing`-based operation logs: tracing carries
//! human-readable diagnostics, while this port captures every
//! [`ProgressEvent`] of a run in a replayable format (JSONL).

use council_domain::{CaseId, ProgressEvent};

/// Records progress events.
///
/// `log` is synchronous and infallible; implementations swallow write errors
/// so a broken log never disturbs a run.
pub trait DeliberationLogger: Send + Sync {
    fn log(&self, case_id: &CaseId, event: &ProgressEvent);
}

/// No-op implementation for tests and when the event log is disabled.
pub struct NoDeliberationLogger;

impl DeliberationLogger for NoDeliberationLogger {
    fn log(&self, _case_id: &CaseId, _event: &ProgressEvent) {}
}
