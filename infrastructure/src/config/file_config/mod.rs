//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod council;
mod logging;
mod output;
mod provider;

pub use council::FileCouncilConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use provider::FileProviderConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Panel and run settings
    pub council: FileCouncilConfig,
    /// Generation provider settings
    pub provider: FileProviderConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Diagnostic log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Problems worth telling the user about. An empty list means the
    /// configuration is usable as is.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Err(e) = self.council.to_run_config().validate() {
            warnings.push(format!("[council] {}", e));
        }
        for participant in self.council.parse_participants() {
            if let council_domain::Participant::Custom(name) = participant {
                warnings.push(format!(
                    "[council] participant '{}' is not a known role; it will sit as a custom specialist",
                    name
                ));
            }
        }
        if self.provider.model.trim().is_empty() {
            warnings.push("[provider] model is empty".to_string());
        }

        warnings
    }
}
