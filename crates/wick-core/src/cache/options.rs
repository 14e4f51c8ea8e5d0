//! Per-query freshness settings.

use std::time::Duration;

/// Staleness window of the settings collection.
pub const COLLECTION_STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// Polling interval of single-key reads.
///
/// Stands in for a push channel so admin edits show up in other views
/// quickly; override it through `SettingsServiceConfig`.
pub const LIVE_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How a cached read ages and what refetches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Results younger than this are served from the cache.
    pub stale_time: Duration,
    /// Refetch when the host signals a focus change (`QueryCache::focus`).
    pub refetch_on_focus: bool,
    /// Refetch when a watcher is created.
    pub refetch_on_mount: bool,
    /// Refetch on a fixed interval while watched.
    pub refetch_interval: Option<Duration>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            refetch_on_focus: true,
            refetch_on_mount: true,
            refetch_interval: None,
        }
    }
}

impl QueryOptions {
    /// Collection reads: five minutes of cache reuse, no polling.
    pub fn collection() -> Self {
        Self {
            stale_time: COLLECTION_STALE_TIME,
            ..Self::default()
        }
    }

    /// Single-key reads: always stale, refetched on focus, mount and every
    /// [`LIVE_POLL_INTERVAL`].
    pub fn live() -> Self {
        Self {
            stale_time: Duration::ZERO,
            refetch_on_focus: true,
            refetch_on_mount: true,
            refetch_interval: Some(LIVE_POLL_INTERVAL),
        }
    }

    #[must_use]
    pub const fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    #[must_use]
    pub const fn with_refetch_interval(mut self, interval: Option<Duration>) -> Self {
        self.refetch_interval = interval;
        self
    }
}
