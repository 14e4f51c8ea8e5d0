//! Cache storage.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::debug;

use super::events::CacheEvent;
use super::key::QueryKey;
use super::lock::mutex_lock;
use super::options::QueryOptions;
use super::state::{QueryState, QueryStatus};
use crate::error::SettingsError;

const SOURCE: &str = "cache::store";

/// Capacity of the event channel; lagging receivers refetch once.
const EVENT_CAPACITY: usize = 64;

type CachedData = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct CacheEntry {
    data: Option<CachedData>,
    error: Option<SettingsError>,
    fetched_at: Option<Instant>,
    data_updated_at: Option<DateTime<Utc>>,
    invalidated: bool,
    /// Bumped by every invalidation.
    generation: u64,
    in_flight: usize,
}

impl CacheEntry {
    fn is_fresh(&self, options: &QueryOptions) -> bool {
        if self.invalidated || self.error.is_some() || self.data.is_none() {
            return false;
        }
        self.fetched_at
            .is_some_and(|at| at.elapsed() < options.stale_time)
    }

    fn state<T: Clone + 'static>(&self) -> QueryState<T> {
        let data = self
            .data
            .as_ref()
            .and_then(|data| data.downcast_ref::<T>())
            .cloned();

        let status = if self.error.is_some() {
            QueryStatus::Error
        } else if data.is_some() {
            QueryStatus::Success
        } else {
            QueryStatus::Loading
        };

        QueryState {
            status,
            data,
            error: self.error.clone(),
            is_fetching: self.in_flight > 0,
            updated_at: self.data_updated_at,
        }
    }
}

/// Process-wide cache of read results keyed by [`QueryKey`].
///
/// Entries hold type-erased data; a key is always read with the type it was
/// fetched with. The entry map sits behind a `std::sync::Mutex` that is never
/// held across an `.await`.
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    events: broadcast::Sender<CacheEvent>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: Mutex::new(HashMap::new()),
            events,
        }
    }

    /// Read through the cache.
    ///
    /// A fresh entry is returned as-is; otherwise `fetcher` runs and its
    /// outcome replaces the entry's data or error. A failed fetch keeps the
    /// previous data around but reports `QueryStatus::Error`.
    ///
    /// An invalidation that lands while the fetcher is running keeps the
    /// entry stale, so the next read refetches.
    pub async fn fetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        options: &QueryOptions,
        fetcher: F,
    ) -> QueryState<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, SettingsError>>,
    {
        let generation = {
            let mut entries = mutex_lock(&self.entries, SOURCE, "fetch.lookup");
            let entry = entries.entry(key.clone()).or_default();
            if entry.is_fresh(options) {
                debug!(%key, "Query cache hit");
                return entry.state();
            }
            entry.in_flight += 1;
            entry.generation
        };

        debug!(%key, "Query cache miss, fetching");
        let guard = InFlight::new(self, key, generation);
        let result = fetcher().await;
        guard.finish(result)
    }

    /// Current state of `key` without any I/O.
    ///
    /// A key that was never fetched reports `QueryStatus::Loading`.
    pub fn snapshot<T: Clone + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        mutex_lock(&self.entries, SOURCE, "snapshot")
            .get(key)
            .map_or_else(QueryState::loading, CacheEntry::state)
    }

    /// Mark exactly `key` stale and tell live watchers about it.
    ///
    /// Cached data is left in place; the next read refetches.
    pub fn invalidate(&self, key: &QueryKey) {
        {
            let mut entries = mutex_lock(&self.entries, SOURCE, "invalidate");
            let entry = entries.entry(key.clone()).or_default();
            entry.invalidated = true;
            entry.generation = entry.generation.wrapping_add(1);
        }
        debug!(%key, "Query invalidated");
        self.publish(CacheEvent::Invalidated(key.clone()));
    }

    /// Signal a focus change; watchers with `refetch_on_focus` refetch.
    pub fn focus(&self) {
        self.publish(CacheEvent::Focused);
    }

    /// Receive invalidation and focus events.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Whether `key` is marked stale by an invalidation that no fetch has
    /// cleared yet.
    pub fn is_invalidated(&self, key: &QueryKey) -> bool {
        mutex_lock(&self.entries, SOURCE, "is_invalidated")
            .get(key)
            .is_some_and(|entry| entry.invalidated)
    }

    /// Number of keys the cache knows about.
    pub fn len(&self) -> usize {
        mutex_lock(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        mutex_lock(&self.entries, SOURCE, "clear").clear();
    }

    fn publish(&self, event: CacheEvent) {
        // No receivers is fine: nobody is watching.
        let _ = self.events.send(event);
    }
}

/// Tracks an outstanding fetch; dropping it unfinished (e.g. when the owning
/// task is aborted) releases the in-flight mark without touching the data.
struct InFlight<'a> {
    cache: &'a QueryCache,
    key: &'a QueryKey,
    /// Entry generation when the fetch started.
    generation: u64,
    armed: bool,
}

impl<'a> InFlight<'a> {
    const fn new(cache: &'a QueryCache, key: &'a QueryKey, generation: u64) -> Self {
        Self {
            cache,
            key,
            generation,
            armed: true,
        }
    }

    fn finish<T>(mut self, result: Result<T, SettingsError>) -> QueryState<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.armed = false;
        let mut entries = mutex_lock(&self.cache.entries, SOURCE, "fetch.store");
        let entry = entries.entry(self.key.clone()).or_default();
        entry.fetched_at = Some(Instant::now());
        if entry.generation == self.generation {
            entry.invalidated = false;
        } else {
            debug!(key = %self.key, "Query invalidated during fetch, staying stale");
        }
        match result {
            Ok(data) => {
                entry.data = Some(Arc::new(data));
                entry.error = None;
                entry.data_updated_at = Some(Utc::now());
            }
            Err(err) => {
                debug!(key = %self.key, error = %err, "Query fetch failed");
                entry.error = Some(err);
            }
        }
        entry.in_flight = entry.in_flight.saturating_sub(1);
        entry.state()
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(entry) =
            mutex_lock(&self.cache.entries, SOURCE, "fetch.cancel").get_mut(self.key)
        {
            entry.in_flight = entry.in_flight.saturating_sub(1);
        }
    }
}
