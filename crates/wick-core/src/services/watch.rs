//! Live single-key reads.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::debug;

use super::settings_service::{read_entry, value_or};
use crate::cache::{CacheEvent, QueryCache, QueryKey, QueryOptions, QueryState};
use crate::domain::Setting;
use crate::ports::SettingsApiPort;

/// A background refresher for one setting key.
///
/// Created by `SettingsService::watch`. The task lives exactly as long as
/// this handle: dropping it aborts the task together with any request it has
/// in flight.
pub struct SettingWatch {
    key: String,
    receiver: watch::Receiver<QueryState<Setting>>,
    task: JoinHandle<()>,
}

impl SettingWatch {
    pub(super) fn spawn(
        api: Arc<dyn SettingsApiPort>,
        cache: Arc<QueryCache>,
        key: String,
        options: QueryOptions,
    ) -> Self {
        let query_key = QueryKey::setting(&key);
        let initial: QueryState<Option<Setting>> = cache.snapshot(&query_key);
        let (sender, receiver) = watch::channel(initial.flatten());

        // Subscribe before spawning so no event between here and the task's
        // first poll is missed.
        let events = cache.subscribe();
        let refresher = Refresher {
            api,
            cache,
            key: key.clone(),
            query_key,
            options,
            sender,
        };
        let task = tokio::spawn(refresher.run(events));

        Self {
            key,
            receiver,
            task,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Latest published state.
    pub fn current(&self) -> QueryState<Setting> {
        self.receiver.borrow().clone()
    }

    /// The latest value, or `default` while loading, on error or when absent.
    pub fn value_or(&self, default: &str) -> String {
        value_or(&self.receiver.borrow(), default)
    }

    /// Wait for the next refresh and return its state.
    ///
    /// Returns `None` once the background task has stopped.
    pub async fn changed(&mut self) -> Option<QueryState<Setting>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

impl Drop for SettingWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Refresher {
    api: Arc<dyn SettingsApiPort>,
    cache: Arc<QueryCache>,
    key: String,
    query_key: QueryKey,
    options: QueryOptions,
    sender: watch::Sender<QueryState<Setting>>,
}

impl Refresher {
    async fn run(self, mut events: broadcast::Receiver<CacheEvent>) {
        if self.options.refetch_on_mount {
            self.refresh("mount").await;
        }

        let mut ticker = self
            .options
            .refetch_interval
            .filter(|period| !period.is_zero())
            .map(|period| {
                let mut interval = tokio::time::interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                interval
            });

        loop {
            tokio::select! {
                () = next_tick(ticker.as_mut()) => self.refresh("interval").await,
                event = events.recv() => match event {
                    Ok(CacheEvent::Focused) if self.options.refetch_on_focus => {
                        self.refresh("focus").await;
                    }
                    Ok(event) if event.targets(&self.query_key) => {
                        self.refresh("invalidated").await;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(key = %self.key, skipped, "Watcher lagged behind cache events");
                        self.refresh("lagged").await;
                    }
                    Err(RecvError::Closed) => break,
                },
                () = self.sender.closed() => break,
            }
        }
    }

    async fn refresh(&self, trigger: &'static str) {
        debug!(key = %self.key, trigger, "Refreshing watched setting");
        let state = read_entry(&self.api, &self.cache, &self.key, &self.options).await;
        self.sender.send_replace(state);
    }
}

async fn next_tick(interval: Option<&mut Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
