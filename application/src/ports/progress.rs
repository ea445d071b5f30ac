//! Progress sink port
//!
//! The only channel through which a run's intermediate state is observable.

use super::event_logger::DeliberationLogger;
use council_domain::{CaseId, ProgressEvent};
use std::sync::Mutex;

/// Receives progress events in emission order.
///
/// Implementations live in the presentation layer (console, UI bridges) or
/// are composed from the adapters below.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// No-op sink for when progress reporting is not needed
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _event: ProgressEvent) {}
}

/// Keeps every event in memory.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn into_events(self) -> Vec<ProgressEvent> {
        self.events
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ProgressSink for CollectingSink {
    fn emit(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

/// Tees every event into a [`DeliberationLogger`] before handing it on.
///
/// Uses borrowed references so both owned and borrowed sinks compose without
/// wrapper types.
pub struct LoggedProgress<'a> {
    inner: &'a dyn ProgressSink,
    logger: &'a dyn DeliberationLogger,
    case_id: CaseId,
}

impl<'a> LoggedProgress<'a> {
    pub fn new(
        inner: &'a dyn ProgressSink,
        logger: &'a dyn DeliberationLogger,
        case_id: CaseId,
    ) -> Self {
        Self {
            inner,
            logger,
            case_id,
        }
    }
}

impl ProgressSink for LoggedProgress<'_> {
    fn emit(&self, event: ProgressEvent) {
        self.logger.log(&self.case_id, &event);
        self.inner.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct KindLogger(Mutex<Vec<String>>);

    impl DeliberationLogger for KindLogger {
        fn log(&self, case_id: &CaseId, event: &ProgressEvent) {
            self.0
                .lock()
                .unwrap()
                .push(format!("{}:{}", case_id, event.kind()));
        }
    }

    #[test]
    fn test_collecting_sink_keeps_order() {
        let sink = CollectingSink::new();
        sink.emit(ProgressEvent::status("a"));
        sink.emit(ProgressEvent::failed("b"));
        let events = sink.into_events();
        assert_eq!(events.len(), 2);
        assert!(events[1].is_terminal());
    }

    #[test]
    fn test_logged_progress_tees_events() {
        let sink = CollectingSink::new();
        let logger = KindLogger(Mutex::new(Vec::new()));
        let tee = LoggedProgress::new(&sink, &logger, CaseId::new("case-7"));

        tee.emit(ProgressEvent::status("starting"));
        tee.emit(ProgressEvent::failed("provider down"));

        assert_eq!(sink.events().len(), 2);
        assert_eq!(
            *logger.0.lock().unwrap(),
            vec!["case-7:status".to_string(), "case-7:failed".to_string()]
        );
    }
}
