//! Case-file loading
//!
//! A case file is a JSON document shaped like [`CaseInput`]. When it has no
//! `case_id` the file stem is used, so `cases/chest-pain.json` becomes case
//! `chest-pain`.

use council_domain::{CaseInput, DomainError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CaseFileError {
    #[error("Cannot read case file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Case file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Case file {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

pub struct CaseFileLoader;

impl CaseFileLoader {
    pub fn load(path: &Path) -> Result<CaseInput, CaseFileError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CaseFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let case = Self::parse(&raw, path)?;
        debug!(case_id = %case.case_id, path = %path.display(), "Loaded case file");
        Ok(case)
    }

    /// Parse case JSON; `origin` names the source for errors and the
    /// fallback case id.
    pub fn parse(raw: &str, origin: &Path) -> Result<CaseInput, CaseFileError> {
        let parse_err = |source| CaseFileError::Parse {
            path: origin.to_path_buf(),
            source,
        };

        let mut value: Value = serde_json::from_str(raw).map_err(parse_err)?;
        if let Value::Object(map) = &mut value
            && !map.contains_key("case_id")
            && let Some(stem) = origin.file_stem().and_then(|s| s.to_str())
        {
            map.insert("case_id".to_string(), Value::String(stem.to_string()));
        }

        let case: CaseInput = serde_json::from_value(value).map_err(parse_err)?;
        case.validate().map_err(|source| CaseFileError::Invalid {
            path: origin.to_path_buf(),
            source,
        })?;
        Ok(case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{FeedbackSignal, Participant};

    #[test]
    fn test_load_full_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case.json");
        std::fs::write(
            &path,
            r#"{
                "case_id": "ward-12",
                "demographics": {"age": 58, "sex": "male"},
                "chief_complaint": "Crushing chest pain for 2 hours",
                "labs": "Troponin I 2.1 ng/mL",
                "participants": ["cardiology", "radiology"],
                "feedback": {"GERD": "refuted"},
                "hypotheses": [{"name": "NSTEMI", "probability": 60, "justification": "troponin"}]
            }"#,
        )
        .unwrap();

        let case = CaseFileLoader::load(&path).unwrap();
        assert_eq!(case.case_id.as_str(), "ward-12");
        assert_eq!(case.demographics.age, Some(58));
        assert_eq!(
            case.participants,
            vec![Participant::Cardiology, Participant::Radiology]
        );
        assert_eq!(case.feedback.get("GERD"), Some(&FeedbackSignal::Refuted));
        assert_eq!(case.hypotheses[0].name, "NSTEMI");
    }

    #[test]
    fn test_missing_case_id_uses_file_stem() {
        let case = CaseFileLoader::parse(
            r#"{"chief_complaint": "Headache"}"#,
            Path::new("cases/thunderclap.json"),
        )
        .unwrap();
        assert_eq!(case.case_id.as_str(), "thunderclap");
    }

    #[test]
    fn test_blank_complaint_is_invalid() {
        let err = CaseFileLoader::parse(
            r#"{"case_id": "x", "chief_complaint": "  "}"#,
            Path::new("x.json"),
        )
        .unwrap_err();
        assert!(matches!(err, CaseFileError::Invalid { .. }));
    }

    #[test]
    fn test_bad_json_and_missing_file() {
        assert!(matches!(
            CaseFileLoader::parse("{not json", Path::new("x.json")),
            Err(CaseFileError::Parse { .. })
        ));
        assert!(matches!(
            CaseFileLoader::load(Path::new("/definitely/not/here.json")),
            Err(CaseFileError::Read { .. })
        ));
    }
}
