//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided source name is empty.
    EmptySourceName,

    /// The provided contact type name is not recognised.
    UnknownContactType(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySourceName => write!(f, "Source name cannot be empty"),
            Self::UnknownContactType(name) => write!(f, "Unknown contact type: {}", name),
        }
    }
}

impl std::error::Error for ValidationError {}
