//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for domain concepts like
//! source names and contact types. These value objects provide validation
//! at construction time and prevent invalid data from being represented
//! in the system.

pub mod contact_type;
pub mod errors;
pub mod source_name;

pub use contact_type::ContactType;
pub use errors::ValidationError;
pub use source_name::SourceName;
