//! Observability: process-local counters for engine activity.
//!
//! Resolution logic does not touch the counter state directly; all
//! instrumentation flows through [`Event`] and `record`.

use std::cell::RefCell;

thread_local! {
    static STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

///
/// Event
///

#[derive(Clone, Copy, Debug)]
pub enum Event {
    SerializeCall,
    FieldResolved,
    CacheHit,
    CacheMiss,
    PermissionDenied,
    WarningEmitted,
}

///
/// EventState
/// Ephemeral, in-memory counters; thread-local, reset on demand.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EventState {
    pub serialize_calls: u64,
    pub fields_resolved: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub permission_denials: u64,
    pub warnings_emitted: u64,
}

pub(crate) fn record(event: Event) {
    STATE.with_borrow_mut(|state| match event {
        Event::SerializeCall => state.serialize_calls += 1,
        Event::FieldResolved => state.fields_resolved += 1,
        Event::CacheHit => state.cache_hits += 1,
        Event::CacheMiss => state.cache_misses += 1,
        Event::PermissionDenied => state.permission_denials += 1,
        Event::WarningEmitted => state.warnings_emitted += 1,
    });
}

/// Snapshot the current thread's counters.
#[must_use]
pub fn report() -> EventState {
    STATE.with_borrow(Clone::clone)
}

/// Reset the current thread's counters.
pub fn reset() {
    STATE.with_borrow_mut(|state| *state = EventState::default());
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_reset_round_trip() {
        reset();
        record(Event::SerializeCall);
        record(Event::CacheMiss);
        record(Event::CacheMiss);

        let state = report();
        assert_eq!(state.serialize_calls, 1);
        assert_eq!(state.cache_misses, 2);

        reset();
        assert_eq!(report(), EventState::default());
    }
}
