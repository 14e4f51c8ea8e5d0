//! Process-wide query cache.
//!
//! Reads are addressed by structured [`QueryKey`]s. Each read carries
//! [`QueryOptions`] that decide how long a cached result may be served
//! without a new round trip and which triggers (mount, focus, polling) should
//! refetch it.
//!
//! Mutations never write into the cache. They call
//! [`QueryCache::invalidate`] for the exact keys they touched, which marks the
//! entries stale and publishes a [`CacheEvent`] so live watchers refetch in
//! the background.

mod events;
mod key;
mod lock;
mod options;
mod state;
mod store;

pub use events::CacheEvent;
pub use key::{QueryKey, SETTINGS_SCOPE};
pub use options::{COLLECTION_STALE_TIME, LIVE_POLL_INTERVAL, QueryOptions};
pub use state::{QueryState, QueryStatus};
pub use store::QueryCache;

pub(crate) use lock::mutex_lock;
