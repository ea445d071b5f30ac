//! JSONL file writer for deliberation progress events.
//!
//! Each [`ProgressEvent`] becomes one JSON line carrying its own `type` tag,
//! plus `case_id` and an RFC 3339 `timestamp`.

use council_application::DeliberationLogger;
use council_domain::{CaseId, ProgressEvent};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Thread-safe via `Mutex<BufWriter<File>>`. Every line is flushed.
pub struct JsonlEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLogger {
    /// Create the log file (and parent directories), truncating any old one.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(case_id: &CaseId, event: &ProgressEvent) -> Option<Value> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut value = match serde_json::to_value(event) {
            Ok(v) => v,
            Err(e) => {
                warn!("Could not serialize {} event: {}", event.kind(), e);
                return None;
            }
        };
        let map = value.as_object_mut()?;
        map.insert("case_id".to_string(), Value::String(case_id.to_string()));
        map.insert("timestamp".to_string(), Value::String(timestamp));
        Some(value)
    }
}

impl DeliberationLogger for JsonlEventLogger {
    fn log(&self, case_id: &CaseId, event: &ProgressEvent) {
        let Some(record) = Self::record(case_id, event) else {
            return;
        };
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Could not write event log {}: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for JsonlEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{Participant, TranscriptEntry};

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs").join("case-7.jsonl");
        let logger = JsonlEventLogger::create(&path).unwrap();
        let case_id = CaseId::new("case-7");

        logger.log(&case_id, &ProgressEvent::status("Round 1 of 3"));
        logger.log(
            &case_id,
            &ProgressEvent::Turn {
                participant: Participant::Cardiology,
            },
        );
        logger.log(
            &case_id,
            &ProgressEvent::Utterance {
                entry: TranscriptEntry::chair(1, "Discuss the ECG"),
            },
        );

        // Lines are flushed as they are written
        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "status");
        assert_eq!(lines[0]["message"], "Round 1 of 3");
        assert_eq!(lines[1]["type"], "turn");
        assert_eq!(lines[2]["type"], "utterance");
        assert_eq!(lines[2]["entry"]["content"], "Discuss the ECG");
        for line in &lines {
            assert_eq!(line["case_id"], "case-7");
            assert!(line["timestamp"].as_str().unwrap().ends_with('Z'));
        }
    }

    #[test]
    fn test_create_truncates_previous_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        std::fs::write(&path, "stale\n").unwrap();

        let logger = JsonlEventLogger::create(&path).unwrap();
        logger.log(&CaseId::new("c"), &ProgressEvent::failed("provider down"));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["type"], "failed");
        assert_eq!(lines[0]["reason"], "provider down");
    }

    #[test]
    fn test_create_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        assert!(JsonlEventLogger::create(blocker.join("log.jsonl")).is_err());
    }
}
