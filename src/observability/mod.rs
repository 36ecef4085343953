//! Observability module for monitoring and metrics.
//!
//! This module provides counters for loads and recomputes alongside
//! structured `tracing` events, plus a timer for operation durations.

pub mod metrics;

pub use metrics::{MetricsTracker, Timer};
