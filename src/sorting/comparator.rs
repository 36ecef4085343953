//! Chained field comparator with empty values pushed last.

use super::policy::{Direction, SortKey, SortPolicy};
use crate::models::MergedContact;
use std::cmp::Ordering;

/// Compares merged contacts by a chain of [`SortKey`]s.
///
/// For each key in turn: an empty or absent value sorts after a non-empty
/// one whatever the direction, two empty values tie, and two non-empty
/// values compare by UTF-16 code units (reversed for descending keys). The first
/// non-equal key decides.
#[derive(Debug, Clone)]
pub struct ContactComparator {
    keys: Vec<SortKey>,
}

impl ContactComparator {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn for_policy(policy: SortPolicy) -> Self {
        Self::new(policy.keys())
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn compare(&self, left: &MergedContact, right: &MergedContact) -> Ordering {
        self.keys
            .iter()
            .map(|key| compare_key(key, left, right))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

fn compare_key(key: &SortKey, left: &MergedContact, right: &MergedContact) -> Ordering {
    let left = key.field.extract(left).filter(|v| !v.is_empty());
    let right = key.field.extract(right).filter(|v| !v.is_empty());

    match (left, right) {
        (Some(l), Some(r)) => match key.direction {
            Direction::Ascending => l.encode_utf16().cmp(r.encode_utf16()),
            Direction::Descending => r.encode_utf16().cmp(l.encode_utf16()),
        },
        // Empty values go last in both directions
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of `contacts` under `policy`.
pub fn sort_contacts<C>(contacts: &mut [C], policy: SortPolicy)
where
    C: AsRef<MergedContact>,
{
    let comparator = ContactComparator::for_policy(policy);
    contacts.sort_by(|a, b| comparator.compare(a.as_ref(), b.as_ref()));
}
