//! Query and type predicates over merged contacts.
//!
//! Both predicates are pure and total: absent or empty fields are an
//! ordinary case, never an error.

pub mod contact_filter;

pub use contact_filter::{matches_query, matches_types, ContactFilter};
