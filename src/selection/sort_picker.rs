//! Sort policy picker.

use crate::sorting::SortPolicy;
use serde::Serialize;

/// One entry of the sort picker list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub policy: SortPolicy,
    pub selected: bool,
}

/// Pending sort policy selection.
#[derive(Debug, Clone)]
pub struct SortPicker {
    initial: SortPolicy,
    selected: SortPolicy,
}

impl SortPicker {
    /// Start a picker from the currently applied policy.
    pub fn new(initial: SortPolicy) -> Self {
        Self {
            initial,
            selected: initial,
        }
    }

    /// All policies with the current selection marked.
    pub fn options(&self) -> Vec<SortOption> {
        SortPolicy::ALL
            .into_iter()
            .map(|policy| SortOption {
                policy,
                selected: policy == self.selected,
            })
            .collect()
    }

    pub fn select(&mut self, policy: SortPolicy) {
        self.selected = policy;
    }

    pub fn selected(&self) -> SortPolicy {
        self.selected
    }

    /// Return to the policy the picker was opened with.
    pub fn reset(&mut self) {
        self.selected = self.initial;
    }

    /// Applying only makes sense when the selection changed.
    pub fn apply_enabled(&self) -> bool {
        self.selected != self.initial
    }

    /// The policy to apply.
    pub fn apply(&self) -> SortPolicy {
        self.selected
    }
}
