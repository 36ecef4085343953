//! Contact merger: groups raw records into merged contacts.

use super::policy::{MergeKey, MergePolicy};
use super::union_find::UnionFind;
use crate::error::{MergeError, MergeResult};
use crate::models::{ContactRecord, ContactSource, MergedContact};
use std::collections::HashMap;

/// Groups records that describe the same person.
///
/// Two records are equivalent when they share a value for any key of the
/// [`MergePolicy`]; equivalence is transitive. Within a merged contact the
/// constituents are ordered by source priority (the order of `sources`) and
/// then by input position, and field values are resolved in that order.
#[derive(Debug, Clone, Default)]
pub struct ContactMerger {
    policy: MergePolicy,
}

impl ContactMerger {
    /// Create a merger using the given identity policy.
    pub fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MergePolicy {
        &self.policy
    }

    /// Merge `records` read from `sources` into deduplicated contacts.
    ///
    /// Merged contacts are returned in order of their earliest record.
    ///
    /// # Errors
    ///
    /// - `MergeError::DuplicateSource` if two sources share a name
    /// - `MergeError::UnknownSource` if a record names a source not in `sources`
    pub fn merge(
        &self,
        sources: &[ContactSource],
        records: Vec<ContactRecord>,
    ) -> MergeResult<Vec<MergedContact>> {
        let mut priority: HashMap<&str, usize> = HashMap::with_capacity(sources.len());
        for (rank, source) in sources.iter().enumerate() {
            if priority.insert(source.name.as_str(), rank).is_some() {
                return Err(MergeError::DuplicateSource(source.name.to_string()));
            }
        }

        let mut ranks = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match priority.get(record.source_name.as_str()) {
                Some(rank) => ranks.push(*rank),
                None => {
                    return Err(MergeError::UnknownSource {
                        index,
                        source_name: record.source_name.to_string(),
                    })
                }
            }
        }

        let mut uf = UnionFind::new(records.len());
        let mut first_seen: HashMap<(MergeKey, String), usize> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            for identity in self.policy.identities(record) {
                match first_seen.get(&identity) {
                    Some(&other) => uf.union(index, other),
                    None => {
                        first_seen.insert(identity, index);
                    }
                }
            }
        }

        // Group number follows the first appearance of each component.
        let mut group_of_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for index in 0..records.len() {
            let root = uf.find(index);
            let group = *group_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(index);
        }

        let record_count = records.len();
        let mut slots: Vec<Option<ContactRecord>> = records.into_iter().map(Some).collect();
        let merged: Vec<MergedContact> = groups
            .into_iter()
            .filter_map(|mut members| {
                members.sort_by_key(|&index| (ranks[index], index));
                let constituents = members
                    .into_iter()
                    .filter_map(|index| slots[index].take())
                    .collect();
                MergedContact::from_records(constituents)
            })
            .collect();

        tracing::debug!(
            sources = sources.len(),
            records = record_count,
            merged = merged.len(),
            policy = %self.policy,
            "Merged contact records"
        );

        Ok(merged)
    }
}
