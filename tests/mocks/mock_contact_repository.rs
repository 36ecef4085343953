use async_trait::async_trait;
use contacts_pipeline::domain::SourceName;
use contacts_pipeline::error::{RepositoryError, RepositoryResult};
use contacts_pipeline::models::{ContactRecord, ContactSource};
use contacts_pipeline::repositories::{ContactRepository, ContactSourceRepository};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of both repository traits that can be
/// easily configured with test data and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    sources: Arc<Mutex<Vec<ContactSource>>>,
    records: Arc<Mutex<Vec<ContactRecord>>>,
    unavailable: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            sources: Arc::new(Mutex::new(Vec::new())),
            records: Arc::new(Mutex::new(Vec::new())),
            unavailable: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Append a source; sources keep insertion order as priority.
    pub fn add_source(&self, source: ContactSource) {
        self.sources.lock().unwrap().push(source);
    }

    /// Add multiple records to the mock repository.
    pub fn add_records(&self, records: Vec<ContactRecord>) {
        self.records.lock().unwrap().extend(records);
    }

    /// Replace all sources and records.
    pub fn replace(&self, sources: Vec<ContactSource>, records: Vec<ContactRecord>) {
        *self.sources.lock().unwrap() = sources;
        *self.records.lock().unwrap() = records;
    }

    /// Make every call fail with `RepositoryError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) -> RepositoryResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if *self.unavailable.lock().unwrap() {
            return Err(RepositoryError::Unavailable("mock offline".to_string()));
        }
        Ok(())
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactSourceRepository for MockContactRepository {
    async fn get_all_contact_sources(&self) -> RepositoryResult<Vec<ContactSource>> {
        self.track_call("get_all_contact_sources")?;
        Ok(self.sources.lock().unwrap().clone())
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    /// Returns every stored record, including ones naming unrequested sources.
    async fn get_contacts(&self, _source_names: &[SourceName]) -> RepositoryResult<Vec<ContactRecord>> {
        self.track_call("get_contacts")?;
        Ok(self.records.lock().unwrap().clone())
    }
}
