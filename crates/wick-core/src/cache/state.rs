//! Observable state of a cached read.

use chrono::{DateTime, Utc};

use crate::error::SettingsError;

/// Lifecycle of a read as seen by presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// No read was issued (e.g. an empty key).
    Idle,
    /// A read is outstanding and no result exists yet.
    Loading,
    /// The latest read succeeded.
    Success,
    /// The latest read failed.
    Error,
}

/// Result of a cached read: data, error and loading flags instead of a
/// `Result`, so callers can render placeholders without handling failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    pub data: Option<T>,
    pub error: Option<SettingsError>,
    /// A fetch for this key is in flight right now.
    pub is_fetching: bool,
    /// When `data` was last written by a successful read.
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> QueryState<T> {
    pub const fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_fetching: false,
            updated_at: None,
        }
    }

    pub const fn loading() -> Self {
        Self {
            status: QueryStatus::Loading,
            data: None,
            error: None,
            is_fetching: true,
            updated_at: None,
        }
    }

    pub fn success(data: T) -> Self {
        Self {
            status: QueryStatus::Success,
            data: Some(data),
            error: None,
            is_fetching: false,
            updated_at: Some(Utc::now()),
        }
    }

    pub const fn failure(error: SettingsError) -> Self {
        Self {
            status: QueryStatus::Error,
            data: None,
            error: Some(error),
            is_fetching: false,
            updated_at: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    /// Data of a successful read; `None` while loading, after an error, or
    /// when the read found nothing.
    pub const fn settled(&self) -> Option<&T> {
        match self.status {
            QueryStatus::Success => self.data.as_ref(),
            QueryStatus::Idle | QueryStatus::Loading | QueryStatus::Error => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        QueryState {
            status: self.status,
            data: self.data.map(f),
            error: self.error,
            is_fetching: self.is_fetching,
            updated_at: self.updated_at,
        }
    }
}

impl<T> QueryState<Option<T>> {
    /// Collapse a read of an optional record: found becomes data, absent
    /// becomes a successful state without data.
    pub fn flatten(self) -> QueryState<T> {
        QueryState {
            status: self.status,
            data: self.data.flatten(),
            error: self.error,
            is_fetching: self.is_fetching,
            updated_at: self.updated_at,
        }
    }
}
