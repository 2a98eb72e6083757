//! Size-capped container for resident catalog entries.
//!
//! Every insertion of a new key is appended to an insertion-order ledger.
//! Eviction is debounced: a sweep runs only when more than the sweep interval
//! has passed since the previous sweep, so the container may temporarily hold
//! more than `capacity` entries. A sweep keeps the entries named by the last
//! `capacity` ledger slots and drops everything else. Reads never renew an
//! entry; the oldest-inserted entries go first.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::clock::Clock;

/// Default soft cap on resident entries.
pub const DEFAULT_CAPACITY: usize = 100;
/// Default minimum time between eviction sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(20);

/// Cap and debounce settings for a [`BoundedCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub capacity: usize,
    pub sweep_interval: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

/// Insertion-ordered, debounced, size-capped map.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    store: HashMap<K, V>,
    ledger: VecDeque<K>,
    policy: CachePolicy,
    last_sweep: Instant,
    clock: Arc<dyn Clock>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub fn new(policy: CachePolicy, clock: Arc<dyn Clock>) -> Self {
        let policy = CachePolicy {
            capacity: policy.capacity.max(1),
            ..policy
        };
        Self {
            store: HashMap::new(),
            ledger: VecDeque::new(),
            policy,
            last_sweep: clock.now(),
            clock,
        }
    }

    /// Store `value` under `key`, then give the sweeper a chance to run.
    pub fn insert(&mut self, key: K, value: V) -> &mut V {
        self.record_insertion(&key);
        match self.store.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.insert(value);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(value),
        }
    }

    /// Return the entry for `key`, inserting `make()` if it is absent.
    ///
    /// Only a real insertion touches the ledger; an existing entry is
    /// returned untouched.
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        if !self.store.contains_key(&key) {
            self.record_insertion(&key);
        }
        self.store.entry(key).or_insert_with(make)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.store.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.store.get_mut(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.store.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.store.keys()
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    // The new key is already in the ledger when the sweep runs, so it always
    // survives even though its value is stored afterwards.
    fn record_insertion(&mut self, key: &K) {
        self.ledger.push_back(key.clone());

        let now = self.clock.now();
        if now.duration_since(self.last_sweep) > self.policy.sweep_interval {
            self.sweep();
            self.last_sweep = now;
        }
    }

    fn sweep(&mut self) {
        let excess = self.ledger.len().saturating_sub(self.policy.capacity);
        if excess == 0 {
            return;
        }
        self.ledger.drain(..excess);

        let keep: HashSet<&K> = self.ledger.iter().collect();
        let before = self.store.len();
        self.store.retain(|key, _| keep.contains(key));

        debug!(
            evicted = before - self.store.len(),
            resident = self.store.len(),
            "Swept bounded cache"
        );
    }
}
