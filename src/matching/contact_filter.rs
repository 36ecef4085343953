//! Free-text query and contact type matching.

use crate::domain::ContactType;
use crate::models::MergedContact;
use std::collections::BTreeSet;

/// Check whether `contact` matches a free-text query.
///
/// The query is trimmed; an empty query matches everything. Otherwise the
/// lower-cased query must be a substring of the lower-cased first name,
/// surname, normalized number or email. Absent fields never match.
pub fn matches_query(contact: &MergedContact, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    fields_contain(contact, &query.to_lowercase())
}

/// Check whether `contact` has at least one of the allowed types.
///
/// An empty `allowed` set means no type filter is active.
pub fn matches_types(contact: &MergedContact, allowed: &BTreeSet<ContactType>) -> bool {
    allowed.is_empty() || !contact.types().is_disjoint(allowed)
}

fn fields_contain(contact: &MergedContact, needle: &str) -> bool {
    [
        contact.first_name(),
        contact.surname(),
        contact.normalized_number(),
        contact.email(),
    ]
    .into_iter()
    .flatten()
    .any(|field| !field.is_empty() && field.to_lowercase().contains(needle))
}

/// Combined query and type predicate with the query prepared once.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    /// Lower-cased, trimmed query; `None` when no query is active
    needle: Option<String>,
    allowed_types: BTreeSet<ContactType>,
}

impl ContactFilter {
    /// Create a filter for the given query and allowed types.
    pub fn new(query: &str, allowed_types: &BTreeSet<ContactType>) -> Self {
        let query = query.trim();
        Self {
            needle: (!query.is_empty()).then(|| query.to_lowercase()),
            allowed_types: allowed_types.clone(),
        }
    }

    /// Whether the filter lets every contact through.
    pub fn is_pass_through(&self) -> bool {
        self.needle.is_none() && self.allowed_types.is_empty()
    }

    /// Check both predicates.
    pub fn matches(&self, contact: &MergedContact) -> bool {
        let query_ok = match &self.needle {
            Some(needle) => fields_contain(contact, needle),
            None => true,
        };
        query_ok && matches_types(contact, &self.allowed_types)
    }
}
