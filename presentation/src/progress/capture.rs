//! Keeps the verdict delivered by the event stream.

use council_application::ProgressSink;
use council_domain::{FinalVerdict, ProgressEvent};
use std::sync::Mutex;

/// Forwards every event to `inner` and remembers the `Verdict` payload.
pub struct VerdictCapture<'a> {
    inner: &'a dyn ProgressSink,
    verdict: Mutex<Option<FinalVerdict>>,
}

impl<'a> VerdictCapture<'a> {
    pub fn new(inner: &'a dyn ProgressSink) -> Self {
        Self {
            inner,
            verdict: Mutex::new(None),
        }
    }

    pub fn take(&self) -> Option<FinalVerdict> {
        self.verdict.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

impl ProgressSink for VerdictCapture<'_> {
    fn emit(&self, event: ProgressEvent) {
        if let ProgressEvent::Verdict { verdict } = &event {
            *self.verdict.lock().unwrap_or_else(|e| e.into_inner()) = Some((**verdict).clone());
        }
        self.inner.emit(event);
    }
}
