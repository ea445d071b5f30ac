//! Diagnostic log configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for rolling diagnostic log files; stderr only when unset
    pub dir: Option<String>,
    /// `EnvFilter` directive used when no `-v` flag or `RUST_LOG` is given
    pub filter: Option<String>,
}
