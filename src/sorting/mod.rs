//! Multi-key, empty-last ordering of merged contacts.
//!
//! A [`SortPolicy`] is data: an ordered list of [`SortKey`]s. A single
//! [`ContactComparator`] evaluates any such list, so adding a policy never
//! needs a new comparator.

pub mod comparator;
pub mod policy;

pub use comparator::{sort_contacts, ContactComparator};
pub use policy::{Direction, SortField, SortKey, SortPolicy};
