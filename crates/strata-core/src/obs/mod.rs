//! Observability: runtime counters and sink abstractions.
//!
//! This module does not inspect key factories or connections directly; they
//! report through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::EventReport;
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
