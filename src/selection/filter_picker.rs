//! Contact type filter picker.

use crate::domain::ContactType;
use serde::Serialize;
use std::collections::BTreeSet;

/// One entry of the filter picker list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub contact_type: ContactType,
    pub selected: bool,
}

/// Pending contact type filter selection.
///
/// An empty selection means "all types".
#[derive(Debug, Clone)]
pub struct FilterPicker {
    initial: BTreeSet<ContactType>,
    selected: BTreeSet<ContactType>,
}

impl FilterPicker {
    /// Start a picker from the currently applied type set.
    pub fn new(initial: BTreeSet<ContactType>) -> Self {
        Self {
            selected: initial.clone(),
            initial,
        }
    }

    /// All contact types with the current selection marked.
    pub fn options(&self) -> Vec<FilterOption> {
        ContactType::ALL
            .into_iter()
            .map(|contact_type| FilterOption {
                contact_type,
                selected: self.selected.contains(&contact_type),
            })
            .collect()
    }

    /// Flip a single type in or out of the selection.
    pub fn toggle(&mut self, contact_type: ContactType) {
        if !self.selected.remove(&contact_type) {
            self.selected.insert(contact_type);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = ContactType::ALL.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self) -> &BTreeSet<ContactType> {
        &self.selected
    }

    /// Return to the type set the picker was opened with.
    pub fn reset(&mut self) {
        self.selected = self.initial.clone();
    }

    pub fn apply_enabled(&self) -> bool {
        self.selected != self.initial
    }

    /// The type set to apply.
    pub fn apply(&self) -> BTreeSet<ContactType> {
        self.selected.clone()
    }
}
