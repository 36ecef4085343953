//! Pipeline state: what the user currently asked to see.

use crate::domain::ContactType;
use crate::sorting::SortPolicy;
use serde::Serialize;
use std::collections::BTreeSet;

/// Current query, type filter and sort policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineState {
    pub query: String,

    /// Allowed contact types; empty means no type filter
    pub allowed_types: BTreeSet<ContactType>,

    pub sort_policy: SortPolicy,
}

impl PipelineState {
    /// Default state for the given default sort policy.
    pub fn new(sort_policy: SortPolicy) -> Self {
        Self {
            query: String::new(),
            allowed_types: BTreeSet::new(),
            sort_policy,
        }
    }

    /// Number of active type filters.
    pub fn active_filter_count(&self) -> usize {
        self.allowed_types.len()
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new(SortPolicy::default())
    }
}
