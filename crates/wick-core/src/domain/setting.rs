//! Setting record and write payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A key/value configuration record persisted by the backend.
///
/// At most one `Setting` exists per `key`. The `id` and timestamps are
/// assigned by the backend; this layer never fabricates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    /// Backend-assigned identity, immutable after creation.
    pub id: i64,
    /// Unique lookup and invalidation token.
    pub key: String,
    /// Opaque payload; no schema is enforced here.
    pub value: String,
    /// When the backend first stored the record.
    pub created_at: DateTime<Utc>,
    /// When the backend last changed the record.
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSetting {
    pub key: String,
    pub value: String,
}

impl NewSetting {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Body of `PUT /api/settings/{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingUpdate {
    pub value: String,
}

impl SettingUpdate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
