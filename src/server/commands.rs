//! Commands accepted on stdin, one JSON object per line.

use crate::domain::ContactType;
use crate::error::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single front-end request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    UpdateQuery {
        #[serde(default)]
        text: String,
    },

    /// Type names are matched case-insensitively
    UpdateFilterTypes {
        #[serde(default)]
        types: Vec<String>,
    },

    UpdateSortPolicy { policy: String },

    /// Print the latest published snapshot
    Snapshot,
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> ServiceResult<Self> {
        serde_json::from_str(line)
            .map_err(|e| ServiceError::InvalidRequest(format!("Malformed command: {}", e)))
    }
}

/// Parse the type names of an `update_filter_types` command.
pub fn parse_types(names: &[String]) -> ServiceResult<BTreeSet<ContactType>> {
    names
        .iter()
        .map(|name| {
            name.parse::<ContactType>()
                .map_err(|e| ServiceError::InvalidRequest(e.to_string()))
        })
        .collect()
}

/// Error line written to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorLine {
    pub error: String,
}

impl ErrorLine {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
