//! Error types for the contacts pipeline.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when reading sources and records from the data-access layer.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Reading the backing store failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the backing JSON document
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store cannot serve requests
    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Data-integrity errors raised while merging records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// A record references a source that was not part of the load
    #[error("Record {index} references unknown source: {source_name}")]
    UnknownSource { index: usize, source_name: String },

    /// Two sources in one load share the same name
    #[error("Duplicate contact source: {0}")]
    DuplicateSource(String),
}

/// Errors that can occur when selecting a sort policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// The policy name is not one of the supported policies
    #[error("Unsupported sort policy: {0}")]
    UnsupportedPolicy(String),
}

/// Errors surfaced by the contact list service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Sort(#[from] SortError),

    /// Writing a reply to the front end failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A request carried an invalid value
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Convenience type alias for Results with RepositoryError
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with MergeError
pub type MergeResult<T> = Result<T, MergeError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
