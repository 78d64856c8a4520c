use std::sync::{Mutex, OnceLock, PoisonError};

///
/// EventReport
/// Ephemeral, in-memory counters for key resolution and connection usage.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EventReport {
    // Key factory resolution
    pub factory_hits: u64,
    pub factory_misses: u64,
    pub simple_factories: u64,
    pub composite_factories: u64,

    // Connection lifecycle
    pub connections_opened: u64,
    pub connections_closed: u64,
}

static STATE: OnceLock<Mutex<EventReport>> = OnceLock::new();

fn state() -> &'static Mutex<EventReport> {
    STATE.get_or_init(|| Mutex::new(EventReport::default()))
}

/// Mutate the global counters; counters stay usable after a panic elsewhere.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventReport) -> R) -> R {
    let mut guard = state().lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

pub(crate) fn report() -> EventReport {
    *state().lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventReport::default());
}
