//! Per-key async gates.
//!
//! Callers that hold a [`GatePass`] for the same key run one at a time. A
//! gate entry lives only as long as someone holds or waits on it; the last
//! pass to drop removes it from the map.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

pub struct KeyedGates<K: Eq + Hash> {
    gates: DashMap<K, Arc<Mutex<()>>>,
}

impl<K: Eq + Hash + Clone> KeyedGates<K> {
    pub fn new() -> Self {
        Self {
            gates: DashMap::new(),
        }
    }

    /// Wait for exclusive use of `key`.
    pub async fn acquire(&self, key: K) -> GatePass<'_, K> {
        let gate = self.gates.entry(key.clone()).or_default().clone();
        let guard = gate.lock_owned().await;
        GatePass {
            owner: self,
            key,
            guard: Some(guard),
        }
    }

    /// Number of keys with a holder or a waiter.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for KeyedGates<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive hold on one key; releases and cleans up on drop.
pub struct GatePass<'a, K: Eq + Hash> {
    owner: &'a KeyedGates<K>,
    key: K,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K: Eq + Hash> Drop for GatePass<'_, K> {
    fn drop(&mut self) {
        // The guard owns a clone of the gate; release it before counting.
        drop(self.guard.take());
        self.owner
            .gates
            .remove_if(&self.key, |_, gate| Arc::strong_count(gate) == 1);
    }
}
