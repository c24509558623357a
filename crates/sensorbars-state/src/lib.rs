//! # sensorbars-state
//!
//! In-memory sensor state for the sensorbars widget.
//!
//! Hosts that keep their own state machine implement
//! [`StateProvider`](sensorbars_core::StateProvider) directly; this crate
//! is the plain store for hosts that don't, and for tests and demos. There
//! is no reactivity here; the host decides when a state change warrants a
//! re-render and calls the renderer again.

use sensorbars_core::{EntityId, StateProvider};
use serde::Deserialize;
use std::collections::HashMap;

/// Bulk state update, typically deserialized from a host payload mapping
/// entity ids to raw states.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot(pub HashMap<String, String>);

/// Current raw states of all known entities.
#[derive(Debug, Clone, Default)]
pub struct SensorStore {
    states: HashMap<EntityId, String>,
}

impl SensorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one entity's raw state.
    pub fn set(&mut self, id: impl Into<EntityId>, state: impl Into<String>) {
        self.states.insert(id.into(), state.into());
    }

    /// Set one entity's state from a number.
    pub fn set_numeric(&mut self, id: impl Into<EntityId>, value: f64) {
        self.set(id, value.to_string());
    }

    pub fn remove(&mut self, id: &EntityId) -> Option<String> {
        self.states.remove(id)
    }

    pub fn get(&self, id: &EntityId) -> Option<&str> {
        self.states.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Merge a bulk snapshot into the store.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        tracing::debug!(count = snapshot.0.len(), "applying state snapshot");
        for (id, state) in snapshot.0 {
            self.states.insert(EntityId::new(id), state);
        }
    }
}

impl From<Snapshot> for SensorStore {
    fn from(snapshot: Snapshot) -> Self {
        let mut store = Self::new();
        store.apply_snapshot(snapshot);
        store
    }
}

impl StateProvider for SensorStore {
    fn state(&self, id: &EntityId) -> Option<String> {
        self.states.get(id).cloned()
    }
}
