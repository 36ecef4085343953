//! Data models for contact sources, raw records and merged contacts.
//!
//! Raw sources and records arrive from the data-access layer and are
//! read-only here. Merged contacts are built once per load and views are
//! disposable display projections of them.

pub mod contact_record;
pub mod contact_source;
pub mod contact_view;
pub mod merged_contact;

pub use contact_record::ContactRecord;
pub use contact_source::ContactSource;
pub use contact_view::ContactView;
pub use merged_contact::MergedContact;

/// Treat absent and empty strings alike.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
