use crate::domain::SourceName;
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{ContactRecord, ContactSource};
use crate::repositories::traits::{ContactRepository, ContactSourceRepository};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// On-disk layout of a contacts file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactDocument {
    #[serde(default)]
    pub sources: Vec<ContactSource>,

    #[serde(default)]
    pub contacts: Vec<ContactRecord>,
}

/// Read-only contact store backed by a JSON document.
///
/// The document is parsed once; both repository traits then serve clones of
/// the parsed data.
#[derive(Debug, Clone)]
pub struct JsonContactStore {
    document: Arc<ContactDocument>,
    origin: Option<PathBuf>,
}

impl JsonContactStore {
    /// Create a store from an already parsed document.
    pub fn from_document(document: ContactDocument) -> Self {
        Self {
            document: Arc::new(document),
            origin: None,
        }
    }

    /// Parse a store from JSON text.
    pub fn from_json(json: &str) -> RepositoryResult<Self> {
        Ok(Self::from_document(serde_json::from_str(json)?))
    }

    /// Read and parse a contacts file.
    ///
    /// File I/O runs on the blocking thread pool.
    pub async fn open(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref().to_path_buf();
        let read_path = path.clone();
        let text = tokio::task::spawn_blocking(move || std::fs::read_to_string(read_path))
            .await
            .map_err(|e| RepositoryError::Unavailable(format!("read task failed: {}", e)))??;

        let mut store = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            sources = store.document.sources.len(),
            records = store.document.contacts.len(),
            "Contacts file parsed"
        );
        store.origin = Some(path);
        Ok(store)
    }

    /// Path the store was read from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }
}

#[async_trait]
impl ContactSourceRepository for JsonContactStore {
    async fn get_all_contact_sources(&self) -> RepositoryResult<Vec<ContactSource>> {
        Ok(self.document.sources.clone())
    }
}

#[async_trait]
impl ContactRepository for JsonContactStore {
    async fn get_contacts(&self, source_names: &[SourceName]) -> RepositoryResult<Vec<ContactRecord>> {
        let wanted: HashSet<&str> = source_names.iter().map(SourceName::as_str).collect();
        Ok(self
            .document
            .contacts
            .iter()
            .filter(|record| wanted.contains(record.source_name.as_str()))
            .cloned()
            .collect())
    }
}
