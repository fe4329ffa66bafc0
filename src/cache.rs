//! Per-key snapshot cache used for scorecards, event cards, and the live
//! roster.
//!
//! Each key owns a slot holding the last fetched value plus an async fetch
//! gate. The gate is what serializes requests: for any single key at most one
//! fetch is outstanding, and waiters re-check freshness after acquiring it so
//! a burst of readers collapses into a single backend call.

use std::{hash::Hash, sync::Arc, time::Duration};

use dashmap::DashMap;
use tokio::{
    sync::{Mutex, RwLock},
    time::Instant,
};

/// Cached value plus the moment it was fetched.
struct Stored<V> {
    value: V,
    fetched_at: Instant,
}

struct Slot<V> {
    value: RwLock<Option<Stored<V>>>,
    fetch_gate: Mutex<()>,
}

impl<V: Clone> Slot<V> {
    fn new() -> Self {
        Self {
            value: RwLock::new(None),
            fetch_gate: Mutex::new(()),
        }
    }

    async fn fresh(&self, ttl: Duration) -> Option<V> {
        let guard = self.value.read().await;
        guard
            .as_ref()
            .filter(|stored| stored.fetched_at.elapsed() <= ttl)
            .map(|stored| stored.value.clone())
    }
}

/// Opaque memento of a slot's prior contents, used to undo a projection.
pub struct SlotMemento<V>(Option<Stored<V>>);

/// Keyed snapshot cache with TTL read-through and reversible projections.
pub struct SnapshotCache<K, V> {
    slots: DashMap<K, Arc<Slot<V>>>,
}

impl<K, V> SnapshotCache<K, V>
where
    K: Eq + Hash + Copy,
    V: Clone,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    fn slot(&self, key: K) -> Arc<Slot<V>> {
        self.slots
            .entry(key)
            .or_insert_with(|| Arc::new(Slot::new()))
            .value()
            .clone()
    }

    /// Return the cached value when it is younger than `ttl`, otherwise run
    /// `fetch` and store its result. Concurrent callers for the same key are
    /// serialized through the slot's gate and share one fetch.
    pub async fn read_through<E, F, Fut>(&self, key: K, ttl: Duration, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self.slot(key);
        if let Some(value) = slot.fresh(ttl).await {
            return Ok(value);
        }

        let _gate = slot.fetch_gate.lock().await;
        if let Some(value) = slot.fresh(ttl).await {
            return Ok(value);
        }

        let value = fetch().await?;
        *slot.value.write().await = Some(Stored {
            value: value.clone(),
            fetched_at: Instant::now(),
        });
        Ok(value)
    }

    /// Cached value regardless of freshness, without fetching.
    pub async fn peek(&self, key: K) -> Option<V> {
        let slot = self.slots.get(&key)?.value().clone();
        let guard = slot.value.read().await;
        guard.as_ref().map(|stored| stored.value.clone())
    }

    /// Drop the cached value so the next read goes to the backend.
    pub async fn invalidate(&self, key: K) {
        if let Some(slot) = self.slots.get(&key).map(|entry| entry.value().clone()) {
            *slot.value.write().await = None;
        }
    }

    /// Apply `project` to the cached value under the write lock, keeping the
    /// original fetch time so a projection never extends freshness. Returns a
    /// memento of the prior contents for [`SnapshotCache::restore`].
    pub async fn project<F>(&self, key: K, project: F) -> SlotMemento<V>
    where
        F: FnOnce(Option<&V>) -> Option<V>,
    {
        let slot = self.slot(key);
        let mut guard = slot.value.write().await;
        let previous = guard.take();

        let fetched_at = previous
            .as_ref()
            .map(|stored| stored.fetched_at)
            .unwrap_or_else(Instant::now);
        if let Some(value) = project(previous.as_ref().map(|stored| &stored.value)) {
            *guard = Some(Stored { value, fetched_at });
        }

        SlotMemento(previous)
    }

    /// Put a slot back to the contents captured by a memento.
    pub async fn restore(&self, key: K, memento: SlotMemento<V>) {
        let slot = self.slot(key);
        *slot.value.write().await = memento.0;
    }
}

impl<K, V> Default for SnapshotCache<K, V>
where
    K: Eq + Hash + Copy,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
