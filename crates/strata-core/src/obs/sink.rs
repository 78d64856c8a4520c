//! Metrics sink boundary.
//!
//! Key and connection logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{key::KeyFactoryKind, obs::metrics};
use std::{cell::RefCell, sync::Arc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Arc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    FactoryResolved { kind: KeyFactoryKind, cached: bool },
    ConnectionOpened,
    ConnectionClosed,
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default process-wide sink that writes into global metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::FactoryResolved { kind, cached } => {
                if cached {
                    m.factory_hits = m.factory_hits.saturating_add(1);
                } else {
                    m.factory_misses = m.factory_misses.saturating_add(1);
                    match kind {
                        KeyFactoryKind::Simple(_) => {
                            m.simple_factories = m.simple_factories.saturating_add(1);
                        }
                        KeyFactoryKind::Composite => {
                            m.composite_factories = m.composite_factories.saturating_add(1);
                        }
                    }
                }
            }
            MetricsEvent::ConnectionOpened => {
                m.connections_opened = m.connections_opened.saturating_add(1);
            }
            MetricsEvent::ConnectionClosed => {
                m.connections_closed = m.connections_closed.saturating_add(1);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

/// Route one event to the scoped override, or to the global sink.
pub(crate) fn record(event: MetricsEvent) {
    // clone out of the slot so a sink may itself record without re-borrowing
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: Arc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Arc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
