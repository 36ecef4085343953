//! Filter-then-sort pipeline over the canonical merged contact set.
//!
//! - **engine**: pure recompute over an immutable merged set
//! - **state**: the query, type filter and sort policy driving a recompute
//! - **snapshot**: immutable published results with menu badges
//! - **worker**: single in-flight, latest-wins background recompute

pub mod engine;
pub mod snapshot;
pub mod state;
pub mod worker;

pub use engine::ContactPipeline;
pub use snapshot::{ContactListSnapshot, MenuBadge, MenuBadges, SnapshotPublisher, SnapshotReceiver};
pub use state::PipelineState;
pub use worker::RecomputeWorker;
