//! Pure recompute over the canonical merged contact set.

use super::snapshot::{ContactListSnapshot, MenuBadges};
use super::state::PipelineState;
use crate::matching::ContactFilter;
use crate::models::{ContactView, MergedContact};
use crate::sorting::{sort_contacts, SortPolicy};
use std::sync::Arc;

/// Owns the merged set built at load time and derives ordered views from it.
///
/// The set is never mutated after construction, so a pipeline can be shared
/// across threads and recomputed concurrently without locking.
#[derive(Debug, Clone)]
pub struct ContactPipeline {
    contacts: Arc<[MergedContact]>,
    default_sort: SortPolicy,
}

impl ContactPipeline {
    /// Create a pipeline over `contacts`.
    ///
    /// `default_sort` is only used to compute the sort badge.
    pub fn new(contacts: Vec<MergedContact>, default_sort: SortPolicy) -> Self {
        Self {
            contacts: contacts.into(),
            default_sort,
        }
    }

    /// The full canonical merged set.
    pub fn contacts(&self) -> &[MergedContact] {
        &self.contacts
    }

    /// Filter the full set by the state's query and types, keeping input order.
    pub fn filter(&self, state: &PipelineState) -> Vec<&MergedContact> {
        let filter = ContactFilter::new(&state.query, &state.allowed_types);
        if filter.is_pass_through() {
            return self.contacts.iter().collect();
        }
        self.contacts
            .iter()
            .filter(|contact| filter.matches(contact))
            .collect()
    }

    /// Filter then sort the full set for `state`.
    pub fn recompute(&self, state: &PipelineState) -> Vec<&MergedContact> {
        let mut contacts = self.filter(state);
        sort_contacts(&mut contacts, state.sort_policy);
        contacts
    }

    /// Recompute and package the result as a publishable snapshot.
    pub fn snapshot(&self, state: &PipelineState, generation: u64) -> ContactListSnapshot {
        let contacts = self
            .recompute(state)
            .into_iter()
            .map(ContactView::from)
            .collect();

        ContactListSnapshot {
            generation,
            state: state.clone(),
            contacts,
            total_count: self.contacts.len(),
            badges: MenuBadges::for_state(state, self.default_sort),
            reset_search_visible: state.has_query(),
            computed_at: chrono::Utc::now(),
        }
    }
}
