//! Background recompute with latest-wins publishing.

use super::engine::ContactPipeline;
use super::snapshot::SnapshotPublisher;
use super::state::PipelineState;
use crate::observability::{MetricsTracker, Timer};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
struct RecomputeRequest {
    generation: u64,
    state: PipelineState,
}

/// Runs recomputes for one pipeline on a dedicated task.
///
/// Requests travel through a `watch` channel, so a burst of requests
/// collapses into the latest one. Only one recompute is in flight at a time;
/// when a newer request arrives while one is running, the running result is
/// discarded instead of published.
#[derive(Debug)]
pub struct RecomputeWorker {
    requests: watch::Sender<Option<RecomputeRequest>>,
    handle: JoinHandle<()>,
}

impl RecomputeWorker {
    /// Spawn the worker task on the current tokio runtime.
    pub fn spawn(
        pipeline: Arc<ContactPipeline>,
        publisher: SnapshotPublisher,
        metrics: MetricsTracker,
    ) -> Self {
        let (requests, receiver) = watch::channel(None);
        let handle = tokio::spawn(run(pipeline, receiver, publisher, metrics));
        Self { requests, handle }
    }

    /// Ask for a recompute of `state`, superseding any pending request.
    pub fn request(&self, generation: u64, state: PipelineState) {
        self.requests
            .send_replace(Some(RecomputeRequest { generation, state }));
    }

    /// Stop accepting requests and wait for the task to finish.
    pub async fn shutdown(self) {
        let Self { requests, handle } = self;
        drop(requests);
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "Recompute worker ended abnormally");
        }
    }
}

async fn run(
    pipeline: Arc<ContactPipeline>,
    mut requests: watch::Receiver<Option<RecomputeRequest>>,
    publisher: SnapshotPublisher,
    metrics: MetricsTracker,
) {
    while requests.changed().await.is_ok() {
        let latest = requests.borrow_and_update().clone();
        let Some(request) = latest else {
            continue;
        };
        let generation = request.generation;

        let timer = Timer::new("recompute");
        let task_pipeline = pipeline.clone();
        let result = tokio::task::spawn_blocking(move || {
            task_pipeline.snapshot(&request.state, request.generation)
        })
        .await;

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                timer.finish_with_status(false);
                tracing::error!(generation, error = %e, "Recompute task failed");
                continue;
            }
        };
        let duration_ms = timer.finish();

        if requests.has_changed().unwrap_or(false) {
            metrics.track_superseded(generation);
            continue;
        }

        let result_count = snapshot.contacts.len();
        if publisher.publish(snapshot) {
            metrics.track_recompute(duration_ms, result_count);
        } else {
            metrics.track_superseded(generation);
        }
    }

    tracing::debug!("Recompute worker stopped");
}
