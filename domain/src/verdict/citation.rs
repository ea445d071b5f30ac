//! Sources cited by grounded generation calls.

use crate::core::string::is_blank;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

impl Citation {
    /// Build a citation from provider metadata.
    ///
    /// Returns `None` when the uri is missing or blank; a missing title falls
    /// back to the uri.
    pub fn resolve(title: Option<&str>, uri: Option<&str>) -> Option<Self> {
        let uri = uri.map(str::trim).filter(|u| !u.is_empty())?;
        let title = match title {
            Some(t) if !is_blank(t) => t.trim().to_string(),
            _ => uri.to_string(),
        };
        Some(Self {
            title,
            uri: uri.to_string(),
        })
    }
}
