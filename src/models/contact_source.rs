//! Contact source model.

use crate::domain::SourceName;
use serde::{Deserialize, Serialize};

/// An origin of raw contact data, e.g. device storage, SIM or an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSource {
    /// Unique identifier of the source
    pub name: SourceName,

    /// Human readable label shown next to the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Account or storage kind (e.g. "sim", "device", "com.telegram")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ContactSource {
    /// Create a source with only its name set.
    pub fn new(name: SourceName) -> Self {
        Self {
            name,
            display_name: None,
            kind: None,
        }
    }

    /// Label for display, falling back to the source name.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| self.name.as_str())
    }
}
