//! Cache events broadcast to live watchers.

use super::key::QueryKey;

/// Something that should make interested readers refetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// An entry was marked stale after a successful mutation.
    Invalidated(QueryKey),
    /// The host regained focus (a window or tab became active again).
    Focused,
}

impl CacheEvent {
    /// Whether this event concerns `key`.
    pub fn targets(&self, key: &QueryKey) -> bool {
        match self {
            Self::Invalidated(invalidated) => invalidated == key,
            Self::Focused => false,
        }
    }
}
