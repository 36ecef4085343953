//! Contacts Pipeline - merges contacts from several sources into one
//! deduplicated, filterable and sortable contact list.
//!
//! Raw records are loaded once and merged into a canonical set. Every change
//! to the search query, type filter or sort policy re-filters and re-sorts
//! that same set on a background task and publishes an immutable snapshot.
//!
//! # Architecture
//!
//! - **domain**: Validated value types (source names, contact types)
//! - **models**: Source records, merged contacts and display views
//! - **merging**: Union-find record merging under a configurable key policy
//! - **matching**: Query and contact type filtering
//! - **sorting**: Sort policies and the empty-last comparator
//! - **pipeline**: State, recompute engine, snapshots and the recompute worker
//! - **selection**: Sort and filter picker state
//! - **repositories**: Data access traits and the JSON file store
//! - **services**: The contact list service exposed to front ends
//! - **server**: Stdio JSON-lines front end
//! - **observability**: Metrics counters and timers
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling

pub mod config;
pub mod domain;
pub mod error;
pub mod matching;
pub mod merging;
pub mod models;
pub mod observability;
pub mod pipeline;
pub mod repositories;
pub mod selection;
pub mod server;
pub mod services;
pub mod sorting;

// Re-export commonly used types
pub use config::Config;
pub use domain::{ContactType, SourceName, ValidationError};
pub use error::{ConfigError, MergeError, RepositoryError, ServiceError, SortError};
pub use merging::{ContactMerger, MergeKey, MergePolicy};
pub use models::{ContactRecord, ContactSource, ContactView, MergedContact};
pub use observability::MetricsTracker;
pub use pipeline::{ContactListSnapshot, ContactPipeline, MenuBadges, PipelineState};
pub use repositories::JsonContactStore;
pub use services::{ContactListService, ContactListServiceImpl};
pub use sorting::{SortKey, SortPolicy};
