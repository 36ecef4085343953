use crate::domain::SourceName;
use crate::error::RepositoryResult;
use crate::models::{ContactRecord, ContactSource};
use async_trait::async_trait;

/// Repository for contact sources.
///
/// The order of the returned sources is the source priority used when
/// resolving merged contact fields.
#[async_trait]
pub trait ContactSourceRepository: Send + Sync {
    /// Retrieve every known contact source.
    async fn get_all_contact_sources(&self) -> RepositoryResult<Vec<ContactSource>>;
}

/// Repository for raw contact records.
///
/// Provides abstraction over record storage and retrieval,
/// enabling different implementations (file store, mock, platform provider).
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve all records belonging to the named sources.
    async fn get_contacts(&self, source_names: &[SourceName]) -> RepositoryResult<Vec<ContactRecord>>;
}
