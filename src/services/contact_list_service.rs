//! Contact list service.
//!
//! Owns the pipeline state and the snapshot channel, loads and merges contacts
//! through the repositories, and turns state updates into recompute requests.

use crate::domain::{ContactType, SourceName};
use crate::error::{ServiceError, ServiceResult};
use crate::merging::ContactMerger;
use crate::observability::{MetricsTracker, Timer};
use crate::pipeline::{
    ContactListSnapshot, ContactPipeline, MenuBadges, PipelineState, RecomputeWorker,
    SnapshotPublisher, SnapshotReceiver,
};
use crate::repositories::{ContactRepository, ContactSourceRepository};
use crate::selection::{FilterPicker, SortPicker};
use crate::sorting::SortPolicy;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Contact list service trait for the operations exposed to a front end.
#[async_trait]
pub trait ContactListService: Send + Sync {
    /// Load sources and records, merge them and publish the first list.
    ///
    /// On failure the previously installed pipeline, if any, stays in place.
    async fn init_load(&self) -> ServiceResult<()>;

    /// Replace the search query.
    async fn update_query(&self, text: String) -> ServiceResult<()>;

    /// Replace the allowed contact types; an empty set disables the filter.
    async fn update_filter_types(&self, types: BTreeSet<ContactType>) -> ServiceResult<()>;

    /// Switch to the named sort policy.
    ///
    /// An unknown name is rejected and leaves the state untouched.
    async fn update_sort_policy(&self, name: &str) -> ServiceResult<()>;

    /// Receive every published snapshot.
    fn subscribe(&self) -> SnapshotReceiver;

    /// Current state, including updates not yet reflected in a snapshot.
    async fn state(&self) -> PipelineState;

    /// Badges for the current state.
    async fn badges(&self) -> MenuBadges;

    fn latest_snapshot(&self) -> Option<Arc<ContactListSnapshot>>;

    /// Generation of the most recent recompute request; 0 before the first load.
    ///
    /// Once a snapshot with this generation is published the list reflects
    /// every accepted update.
    fn requested_generation(&self) -> u64;

    /// Sort picker seeded from the current policy.
    async fn sort_picker(&self) -> SortPicker;

    /// Filter picker seeded from the current type selection.
    async fn filter_picker(&self) -> FilterPicker;
}

/// Default implementation of ContactListService.
pub struct ContactListServiceImpl {
    source_repository: Arc<dyn ContactSourceRepository>,
    contact_repository: Arc<dyn ContactRepository>,
    merger: ContactMerger,
    default_sort: SortPolicy,
    state: RwLock<PipelineState>,
    worker: Mutex<Option<RecomputeWorker>>,
    generation: AtomicU64,
    publisher: SnapshotPublisher,
    metrics: MetricsTracker,
}

impl ContactListServiceImpl {
    /// Create a new contact list service.
    ///
    /// Nothing is loaded until [`ContactListService::init_load`] is called.
    pub fn new(
        source_repository: Arc<dyn ContactSourceRepository>,
        contact_repository: Arc<dyn ContactRepository>,
        merger: ContactMerger,
        default_sort: SortPolicy,
        metrics: MetricsTracker,
    ) -> Self {
        Self {
            source_repository,
            contact_repository,
            merger,
            default_sort,
            state: RwLock::new(PipelineState::new(default_sort)),
            worker: Mutex::new(None),
            generation: AtomicU64::new(0),
            publisher: SnapshotPublisher::new(),
            metrics,
        }
    }

    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    async fn load_pipeline(&self) -> ServiceResult<(ContactPipeline, usize)> {
        let sources = self.source_repository.get_all_contact_sources().await?;
        let names: Vec<SourceName> = sources.iter().map(|s| s.name.clone()).collect();
        let records = self.contact_repository.get_contacts(&names).await?;
        let record_count = records.len();
        tracing::debug!(
            sources = sources.len(),
            records = record_count,
            merge_keys = %self.merger.policy(),
            "Contacts fetched"
        );

        let merged = self.merger.merge(&sources, records)?;
        Ok((ContactPipeline::new(merged, self.default_sort), record_count))
    }

    /// Apply `update` to the state and request a recompute of the result.
    ///
    /// The state lock is held until the request is queued so generations
    /// follow the order in which updates were applied.
    async fn apply<F>(&self, update: F)
    where
        F: FnOnce(&mut PipelineState) + Send,
    {
        let mut state = self.state.write().await;
        update(&mut *state);
        tracing::debug!(
            query = %state.query,
            types = state.active_filter_count(),
            sort = %state.sort_policy,
            "Pipeline state updated"
        );

        let worker = self.worker.lock().await;
        match worker.as_ref() {
            Some(worker) => worker.request(self.next_generation(), state.clone()),
            None => tracing::debug!("Contacts not loaded yet, state stored for first recompute"),
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl ContactListService for ContactListServiceImpl {
    async fn init_load(&self) -> ServiceResult<()> {
        let timer = Timer::new("init_load");

        let (pipeline, record_count) = match self.load_pipeline().await {
            Ok(loaded) => loaded,
            Err(e) => {
                timer.finish_with_status(false);
                self.metrics.track_load_failure(&e.to_string());
                return Err(e);
            }
        };
        let merged_count = pipeline.contacts().len();

        let replaced = {
            let state = self.state.read().await;
            let mut worker = self.worker.lock().await;
            let next = RecomputeWorker::spawn(
                Arc::new(pipeline),
                self.publisher.clone(),
                self.metrics.clone(),
            );
            next.request(self.next_generation(), state.clone());
            worker.replace(next)
        };

        self.metrics
            .track_load(timer.finish_with_status(true), record_count, merged_count);

        if let Some(previous) = replaced {
            previous.shutdown().await;
        }
        Ok(())
    }

    async fn update_query(&self, text: String) -> ServiceResult<()> {
        self.apply(|state| state.query = text).await;
        Ok(())
    }

    async fn update_filter_types(&self, types: BTreeSet<ContactType>) -> ServiceResult<()> {
        self.apply(|state| state.allowed_types = types).await;
        Ok(())
    }

    async fn update_sort_policy(&self, name: &str) -> ServiceResult<()> {
        let policy = name.parse::<SortPolicy>().map_err(|e| {
            self.metrics.track_rejected_request("sort_policy");
            ServiceError::from(e)
        })?;
        self.apply(|state| state.sort_policy = policy).await;
        Ok(())
    }

    fn subscribe(&self) -> SnapshotReceiver {
        self.publisher.subscribe()
    }

    async fn state(&self) -> PipelineState {
        self.state.read().await.clone()
    }

    async fn badges(&self) -> MenuBadges {
        MenuBadges::for_state(&*self.state.read().await, self.default_sort)
    }

    fn latest_snapshot(&self) -> Option<Arc<ContactListSnapshot>> {
        self.publisher.latest()
    }

    fn requested_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    async fn sort_picker(&self) -> SortPicker {
        SortPicker::new(self.state.read().await.sort_policy)
    }

    async fn filter_picker(&self) -> FilterPicker {
        FilterPicker::new(self.state.read().await.allowed_types.clone())
    }
}
