//! Shared fakes for settings integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;

use wick_core::{
    ApiError, NewSetting, Notification, Notifier, Probe, QueryCache, Setting, SettingUpdate,
    SettingsApiPort, SettingsService, SettingsServiceConfig,
};

/// Per-endpoint call counters.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub list: AtomicUsize,
    pub fetch: AtomicUsize,
    pub create: AtomicUsize,
    pub update: AtomicUsize,
    pub delete: AtomicUsize,
}

impl CallCounts {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// In-memory stand-in for the `/api/settings` backend.
#[derive(Default)]
pub struct InMemorySettingsApi {
    rows: Mutex<BTreeMap<String, Setting>>,
    next_id: AtomicUsize,
    fetch_failure: Mutex<Option<u16>>,
    write_failure: Mutex<Option<String>>,
    list_gate: Mutex<Option<Arc<Notify>>>,
    pub calls: CallCounts,
}

impl InMemorySettingsApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert a row directly, as another admin tab would.
    pub fn seed(&self, key: &str, value: &str) {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let id = self.allocate_id();
        rows.insert(
            key.to_string(),
            Setting {
                id,
                key: key.to_string(),
                value: value.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
    }

    /// Change a value behind the service's back.
    pub fn set_directly(&self, key: &str, value: &str) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.get_mut(key) {
            row.value = value.to_string();
            row.updated_at = Utc::now();
        }
    }

    /// Make single-key reads answer with `status`.
    pub fn fail_fetch_with(&self, status: u16) {
        *self.fetch_failure.lock().unwrap() = Some(status);
    }

    /// Make writes fail with `message`.
    pub fn fail_writes_with(&self, message: &str) {
        *self.write_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Make the next collection read take its snapshot and then wait for
    /// [`Self::release_lists`].
    pub fn hold_lists(&self) {
        *self.list_gate.lock().unwrap() = Some(Arc::new(Notify::new()));
    }

    pub fn release_lists(&self) {
        if let Some(gate) = self.list_gate.lock().unwrap().take() {
            gate.notify_one();
        }
    }

    pub fn value_of(&self, key: &str) -> Option<String> {
        self.rows.lock().unwrap().get(key).map(|row| row.value.clone())
    }

    fn allocate_id(&self) -> i64 {
        i64::try_from(self.next_id.fetch_add(1, Ordering::SeqCst) + 1).unwrap()
    }

    fn write_failure(&self) -> Result<(), ApiError> {
        match self.write_failure.lock().unwrap().clone() {
            Some(message) => Err(ApiError::Status {
                status: 500,
                message,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SettingsApiPort for InMemorySettingsApi {
    async fn list(&self) -> Result<Vec<Setting>, ApiError> {
        let rows: Vec<Setting> = self.rows.lock().unwrap().values().cloned().collect();
        let gate = self.list_gate.lock().unwrap().clone();
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(rows)
    }

    async fn fetch(&self, key: &str) -> Result<Probe, ApiError> {
        self.calls.fetch.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = *self.fetch_failure.lock().unwrap() {
            return Err(ApiError::Status {
                status,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .map_or(Probe::NotFound, Probe::Found))
    }

    async fn create(&self, setting: &NewSetting) -> Result<Setting, ApiError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        self.write_failure()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&setting.key) {
            return Err(ApiError::Status {
                status: 409,
                message: format!("setting '{}' already exists", setting.key),
            });
        }
        let now = Utc::now();
        let row = Setting {
            id: self.allocate_id(),
            key: setting.key.clone(),
            value: setting.value.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.insert(setting.key.clone(), row.clone());
        Ok(row)
    }

    async fn update(&self, key: &str, update: &SettingUpdate) -> Result<Setting, ApiError> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        self.write_failure()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows.get_mut(key).ok_or_else(|| ApiError::Status {
            status: 404,
            message: format!("setting '{key}' not found"),
        })?;
        row.value = update.value.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, key: &str) -> Result<(), ApiError> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.write_failure()?;
        self.rows.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Notifier that keeps everything it is shown.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// A service wired to fresh fakes.
pub struct Harness {
    pub api: Arc<InMemorySettingsApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub service: SettingsService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(SettingsServiceConfig::default())
    }

    pub fn with_config(config: SettingsServiceConfig) -> Self {
        let api = InMemorySettingsApi::new();
        let notifier = RecordingNotifier::new();
        let service = SettingsService::with_config(
            api.clone(),
            Arc::new(QueryCache::new()),
            notifier.clone(),
            config,
        );
        Self {
            api,
            notifier,
            service,
        }
    }
}
