//! Merging of raw per-source records into deduplicated contacts.
//!
//! Records are grouped by a configurable identity policy. Equivalence is
//! closed transitively with a union-find, so the resulting partition does
//! not depend on the order records arrive in.

pub mod merger;
pub mod policy;
mod union_find;

pub use merger::ContactMerger;
pub use policy::{MergeKey, MergePolicy, DEFAULT_MERGE_POLICY};
