//! Panel configuration from TOML (`[council]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [council]
//! rounds = 3
//! participants = ["internal_medicine", "cardiology", "infectious_disease"]
//! prognosis_window = 6
//! max_provider_retries = 1
//! retry_backoff_ms = 500
//! grounded_synthesis = true
//! ```

use council_application::RunConfig;
use council_domain::Participant;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Number of debate rounds
    pub rounds: u32,
    /// Specialist seats in speaking order (role names or free-form custom roles)
    pub participants: Vec<String>,
    /// Transcript entries shown to the prognosis call
    pub prognosis_window: usize,
    /// Extra attempts after a provider failure
    pub max_provider_retries: u32,
    /// Pause between attempts, in milliseconds
    pub retry_backoff_ms: u64,
    /// Ground the final report in web sources
    pub grounded_synthesis: bool,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        let defaults = RunConfig::default();
        Self {
            rounds: defaults.round_count,
            participants: defaults
                .participants
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            prognosis_window: defaults.prognosis_window,
            max_provider_retries: defaults.max_provider_retries,
            retry_backoff_ms: defaults.retry_backoff.as_millis() as u64,
            grounded_synthesis: defaults.grounded_synthesis,
        }
    }
}

impl FileCouncilConfig {
    pub fn parse_participants(&self) -> Vec<Participant> {
        self.participants
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.parse::<Participant>().unwrap_or_else(|never| match never {}))
            .collect()
    }

    /// Convert to the application's run configuration.
    ///
    /// Validation (empty panel, duplicates, zero rounds) happens when the
    /// run starts.
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig::default()
            .with_round_count(self.rounds)
            .with_participants(self.parse_participants())
            .with_prognosis_window(self.prognosis_window)
            .with_max_provider_retries(self.max_provider_retries)
            .with_retry_backoff(Duration::from_millis(self.retry_backoff_ms))
            .with_grounded_synthesis(self.grounded_synthesis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_run_config() {
        let config = FileCouncilConfig::default().to_run_config();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_deserialize_council_section() {
        let toml_str = r#"
[council]
rounds = 2
participants = ["neurology", "Emergency Medicine", "sleep medicine"]
grounded_synthesis = true
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let run = config.council.to_run_config();
        assert_eq!(run.round_count, 2);
        assert_eq!(
            run.participants,
            vec![
                Participant::Neurology,
                Participant::EmergencyMedicine,
                Participant::Custom("sleep medicine".to_string()),
            ]
        );
        assert!(run.grounded_synthesis);
        // Unset keys keep their defaults
        assert_eq!(run.prognosis_window, 6);
    }

    #[test]
    fn test_blank_participants_are_ignored() {
        let config = FileCouncilConfig {
            participants: vec!["cardiology".to_string(), "  ".to_string()],
            ..Default::default()
        };
        assert_eq!(config.parse_participants(), vec![Participant::Cardiology]);
    }
}
