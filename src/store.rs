use crate::codec::location::{decode_location, encode_location};
use crate::core::state::MapState;
use crate::traits::LastStateStore;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory last-state store; reads and writes whole snapshots
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    state: Mutex<Option<MapState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: MapState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    /// Seeds the store from a `lon|lat|zoom|layers` string; an unreadable
    /// string leaves it empty
    pub fn from_location(text: &str) -> Self {
        let state = decode_location(text);
        if state.is_none() {
            log::debug!("ignoring unreadable stored location {:?}", text);
        }

        Self {
            state: Mutex::new(state),
        }
    }

    /// The stored state as a `lon|lat|zoom|layers` string
    pub fn to_location(&self) -> Option<String> {
        self.get().as_ref().map(encode_location)
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// The snapshot is a plain value, so a panic elsewhere cannot leave it
    /// half-written and a poisoned lock is still safe to use
    fn lock(&self) -> MutexGuard<'_, Option<MapState>> {
        self.state.lock().unwrap_or_else(|e| {
            log::warn!("recovering poisoned last state store");
            PoisonError::into_inner(e)
        })
    }
}

impl LastStateStore for MemoryStateStore {
    fn get(&self) -> Option<MapState> {
        self.lock().clone()
    }

    fn set(&self, state: &MapState) {
        *self.lock() = Some(state.clone());
    }
}
