//! Settings service - the access layer for key/value settings.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::keyed_lock::KeyedLocks;
use super::watch::SettingWatch;
use crate::cache::{
    COLLECTION_STALE_TIME, LIVE_POLL_INTERVAL, QueryCache, QueryKey, QueryOptions, QueryState,
};
use crate::domain::{NewSetting, Setting, SettingUpdate};
use crate::error::{SettingsError, WriteOperation};
use crate::keys;
use crate::ports::{Notification, Notifier, Probe, SettingsApiPort};

/// Freshness knobs of the access layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsServiceConfig {
    /// How long `list_all` may serve a cached collection.
    pub collection_stale_time: Duration,
    /// Polling interval of watched single-key reads.
    pub poll_interval: Duration,
}

impl Default for SettingsServiceConfig {
    fn default() -> Self {
        Self {
            collection_stale_time: COLLECTION_STALE_TIME,
            poll_interval: LIVE_POLL_INTERVAL,
        }
    }
}

impl SettingsServiceConfig {
    pub fn collection_options(&self) -> QueryOptions {
        QueryOptions::collection().with_stale_time(self.collection_stale_time)
    }

    pub fn entry_options(&self) -> QueryOptions {
        QueryOptions::live().with_refetch_interval(Some(self.poll_interval))
    }
}

/// Service for settings reads and writes.
///
/// Reads go through the shared [`QueryCache`] and report failures inside the
/// returned [`QueryState`]. Writes probe, write, invalidate the two affected
/// cache keys, and notify the user.
pub struct SettingsService {
    api: Arc<dyn SettingsApiPort>,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
    config: SettingsServiceConfig,
    write_locks: KeyedLocks,
    pending_writes: AtomicUsize,
}

impl SettingsService {
    /// Create a new settings service with default freshness settings.
    pub fn new(
        api: Arc<dyn SettingsApiPort>,
        cache: Arc<QueryCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_config(api, cache, notifier, SettingsServiceConfig::default())
    }

    pub fn with_config(
        api: Arc<dyn SettingsApiPort>,
        cache: Arc<QueryCache>,
        notifier: Arc<dyn Notifier>,
        config: SettingsServiceConfig,
    ) -> Self {
        Self {
            api,
            cache,
            notifier,
            config,
            write_locks: KeyedLocks::default(),
            pending_writes: AtomicUsize::new(0),
        }
    }

    /// The shared cache, e.g. to forward focus changes.
    pub const fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub const fn config(&self) -> &SettingsServiceConfig {
        &self.config
    }

    /// Whether an upsert or remove is in progress.
    pub fn is_mutating(&self) -> bool {
        self.pending_writes.load(Ordering::SeqCst) > 0
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Every setting, served from cache within the collection stale window.
    pub async fn list_all(&self) -> QueryState<Vec<Setting>> {
        let api = Arc::clone(&self.api);
        self.cache
            .fetch(
                &QueryKey::settings(),
                &self.config.collection_options(),
                || async move { api.list().await.map_err(SettingsError::from_read) },
            )
            .await
    }

    /// One setting, always read fresh. An empty key issues no request and
    /// yields an idle state; a dot-only key fails with
    /// [`SettingsError::InvalidKey`] without a request.
    pub async fn get_by_key(&self, key: &str) -> QueryState<Setting> {
        if key.is_empty() {
            return QueryState::idle();
        }
        read_entry(&self.api, &self.cache, key, &self.config.entry_options()).await
    }

    /// The setting's value, or `default` while loading, on error, or when
    /// the key is absent.
    pub async fn get_value(&self, key: &str, default: &str) -> String {
        value_or(&self.get_by_key(key).await, default)
    }

    /// Like [`get_value`](Self::get_value) but from the current cache
    /// snapshot only, without I/O.
    pub fn value_now(&self, key: &str, default: &str) -> String {
        if key.is_empty() {
            return default.to_string();
        }
        let state: QueryState<Option<Setting>> = self.cache.snapshot(&QueryKey::setting(key));
        value_or(&state.flatten(), default)
    }

    /// Keep `key` fresh in the background.
    ///
    /// The watch refetches on creation, on every poll tick, on focus and when
    /// the key is invalidated. Dropping it cancels any in-flight request.
    pub fn watch(&self, key: &str) -> SettingWatch {
        SettingWatch::spawn(
            Arc::clone(&self.api),
            Arc::clone(&self.cache),
            key.to_string(),
            self.config.entry_options(),
        )
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Create or update `key`.
    ///
    /// Probes first: found means update, 404 means create, anything else
    /// aborts with [`SettingsError::Probe`] before any write. Concurrent
    /// upserts of the same key in this process run one after another.
    pub async fn upsert(&self, key: &str, value: &str) -> Result<Setting, SettingsError> {
        if !keys::is_addressable(key) {
            return Err(SettingsError::InvalidKey);
        }

        let _pending = PendingWrite::begin(&self.pending_writes);
        let _serialized = self.write_locks.lock(key).await;

        let result = self.probe_and_write(key, value).await;
        match &result {
            Ok(setting) => {
                self.invalidate(key);
                info!(key, id = setting.id, "Setting saved");
                self.notifier.notify(Notification::success(
                    "Setting saved",
                    format!("'{key}' was saved."),
                ));
            }
            Err(err) => {
                warn!(key, error = %err, "Setting upsert failed");
                self.notifier
                    .notify(Notification::error("Failed to save setting", err.user_message()));
            }
        }
        result
    }

    /// Delete `key` without probing.
    ///
    /// A failure notifies the user and is returned to the caller; the cache
    /// is left untouched.
    pub async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        if !keys::is_addressable(key) {
            return Err(SettingsError::InvalidKey);
        }

        let _pending = PendingWrite::begin(&self.pending_writes);
        let _serialized = self.write_locks.lock(key).await;

        if let Err(err) = self.api.delete(key).await {
            let err = SettingsError::from_write(key, WriteOperation::Delete, &err);
            warn!(key, error = %err, "Setting delete failed");
            self.notifier.notify(Notification::error(
                "Failed to delete setting",
                err.user_message(),
            ));
            return Err(err);
        }

        self.invalidate(key);
        info!(key, "Setting deleted");
        self.notifier.notify(Notification::success(
            "Setting deleted",
            format!("'{key}' was deleted."),
        ));
        Ok(())
    }

    async fn probe_and_write(&self, key: &str, value: &str) -> Result<Setting, SettingsError> {
        let probe = self
            .api
            .fetch(key)
            .await
            .map_err(|err| SettingsError::from_probe(key, err))?;

        match probe {
            Probe::Found(_) => {
                debug!(key, "Setting exists, updating");
                self.api
                    .update(key, &SettingUpdate::new(value))
                    .await
                    .map_err(|err| SettingsError::from_write(key, WriteOperation::Update, &err))
            }
            Probe::NotFound => {
                debug!(key, "Setting absent, creating");
                self.api
                    .create(&NewSetting::new(key, value))
                    .await
                    .map_err(|err| SettingsError::from_write(key, WriteOperation::Create, &err))
            }
        }
    }

    fn invalidate(&self, key: &str) {
        self.cache.invalidate(&QueryKey::settings());
        self.cache.invalidate(&QueryKey::setting(key));
    }
}

/// Fetch one key through the cache.
pub(super) async fn read_entry(
    api: &Arc<dyn SettingsApiPort>,
    cache: &QueryCache,
    key: &str,
    options: &QueryOptions,
) -> QueryState<Setting> {
    if !keys::is_addressable(key) {
        return QueryState::failure(SettingsError::InvalidKey);
    }
    let api = Arc::clone(api);
    let owned_key = key.to_string();
    cache
        .fetch(&QueryKey::setting(key), options, || async move {
            api.fetch(&owned_key)
                .await
                .map(Probe::into_setting)
                .map_err(SettingsError::from_read)
        })
        .await
        .flatten()
}

pub(super) fn value_or(state: &QueryState<Setting>, default: &str) -> String {
    state
        .settled()
        .map_or_else(|| default.to_string(), |setting| setting.value.clone())
}

/// Counts an in-progress write for `is_mutating`.
struct PendingWrite<'a>(&'a AtomicUsize);

impl<'a> PendingWrite<'a> {
    fn begin(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingWrite<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ApiError, MockSettingsApiPort, NoopNotifier, Severity};
    use chrono::Utc;
    use std::sync::Mutex;

    fn setting(key: &str, value: &str) -> Setting {
        let now = Utc::now();
        Setting {
            id: 1,
            key: key.to_string(),
            value: value.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[derive(Default)]
    struct CollectingNotifier {
        seen: Mutex<Vec<Notification>>,
    }

    impl Notifier for CollectingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }

    fn service_with(api: MockSettingsApiPort) -> (SettingsService, Arc<CollectingNotifier>) {
        let notifier = Arc::new(CollectingNotifier::default());
        let service = SettingsService::new(
            Arc::new(api),
            Arc::new(QueryCache::new()),
            notifier.clone(),
        );
        (service, notifier)
    }

    #[tokio::test]
    async fn test_upsert_existing_key_updates_once() {
        let mut api = MockSettingsApiPort::new();
        api.expect_fetch()
            .withf(|key| key == "storeName")
            .times(1)
            .returning(|_| Ok(Probe::Found(setting("storeName", "Kerzenwelt"))));
        api.expect_update()
            .withf(|key, update| key == "storeName" && update.value == "Kerzenwelt 2")
            .times(1)
            .returning(|key, update| Ok(setting(key, &update.value)));
        api.expect_create().times(0);

        let (service, notifier) = service_with(api);
        let saved = service.upsert("storeName", "Kerzenwelt 2").await.unwrap();

        assert_eq!(saved.value, "Kerzenwelt 2");
        let seen = notifier.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_upsert_absent_key_creates_once() {
        let mut api = MockSettingsApiPort::new();
        api.expect_fetch()
            .times(1)
            .returning(|_| Ok(Probe::NotFound));
        api.expect_create()
            .withf(|new| new.key == "storeName" && new.value == "Kerzenwelt")
            .times(1)
            .returning(|new| Ok(setting(&new.key, &new.value)));
        api.expect_update().times(0);

        let (service, _) = service_with(api);
        let saved = service.upsert("storeName", "Kerzenwelt").await.unwrap();
        assert_eq!(saved.key, "storeName");
    }

    #[tokio::test]
    async fn test_probe_failure_writes_nothing() {
        let mut api = MockSettingsApiPort::new();
        api.expect_fetch().times(1).returning(|_| {
            Err(ApiError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            })
        });
        api.expect_create().times(0);
        api.expect_update().times(0);

        let (service, notifier) = service_with(api);
        let err = service.upsert("storeName", "x").await.unwrap_err();

        assert!(matches!(err, SettingsError::Probe { status: 500, .. }));
        assert!(!service.cache().is_invalidated(&QueryKey::settings()));
        assert_eq!(
            notifier.seen.lock().unwrap()[0].severity,
            Severity::Error
        );
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_untouched_and_notifies() {
        let mut api = MockSettingsApiPort::new();
        api.expect_fetch().returning(|_| Ok(Probe::NotFound));
        api.expect_create().times(1).returning(|_| {
            Err(ApiError::Status {
                status: 409,
                message: "key already exists".to_string(),
            })
        });

        let (service, notifier) = service_with(api);
        let err = service.upsert("storeName", "x").await.unwrap_err();

        assert!(matches!(
            err,
            SettingsError::Write {
                operation: WriteOperation::Create,
                ..
            }
        ));
        assert!(!service.cache().is_invalidated(&QueryKey::settings()));
        assert!(!service.cache().is_invalidated(&QueryKey::setting("storeName")));

        let seen = notifier.seen.lock().unwrap();
        assert_eq!(seen[0].description, "key already exists");
    }

    #[tokio::test]
    async fn test_successful_writes_invalidate_both_keys() {
        let mut api = MockSettingsApiPort::new();
        api.expect_fetch().returning(|_| Ok(Probe::NotFound));
        api.expect_create()
            .returning(|new| Ok(setting(&new.key, &new.value)));
        api.expect_delete().times(1).returning(|_| Ok(()));

        let (service, _) = service_with(api);

        service.upsert("storeName", "Kerzenwelt").await.unwrap();
        assert!(service.cache().is_invalidated(&QueryKey::settings()));
        assert!(service.cache().is_invalidated(&QueryKey::setting("storeName")));
        assert!(!service.cache().is_invalidated(&QueryKey::setting("deliveryFee")));

        service.cache().clear();
        service.remove("storeName").await.unwrap();
        assert!(service.cache().is_invalidated(&QueryKey::settings()));
        assert!(service.cache().is_invalidated(&QueryKey::setting("storeName")));
    }

    #[tokio::test]
    async fn test_remove_failure_propagates_and_notifies() {
        let mut api = MockSettingsApiPort::new();
        api.expect_delete().times(1).returning(|_| {
            Err(ApiError::Network {
                message: "connection reset".to_string(),
            })
        });

        let (service, notifier) = service_with(api);
        let err = service.remove("storeName").await.unwrap_err();

        assert!(matches!(
            err,
            SettingsError::Write {
                operation: WriteOperation::Delete,
                ..
            }
        ));
        let seen = notifier.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].severity, Severity::Error);
        assert_eq!(seen[0].title, "Failed to delete setting");
        assert_eq!(seen[0].description, "connection reset");
        assert!(!service.cache().is_invalidated(&QueryKey::setting("storeName")));
    }

    #[tokio::test]
    async fn test_empty_key_is_a_no_op_read() {
        let mut api = MockSettingsApiPort::new();
        api.expect_fetch().times(0);

        let (service, _) = service_with(api);
        let state = service.get_by_key("").await;

        assert_eq!(state.status, crate::cache::QueryStatus::Idle);
        assert_eq!(service.get_value("", "fallback").await, "fallback");
        assert!(matches!(
            service.upsert("", "x").await,
            Err(SettingsError::InvalidKey)
        ));
    }

    #[tokio::test]
    async fn test_dot_only_keys_are_rejected_without_requests() {
        let mut api = MockSettingsApiPort::new();
        api.expect_fetch().times(0);
        api.expect_create().times(0);
        api.expect_update().times(0);
        api.expect_delete().times(0);

        let (service, notifier) = service_with(api);

        assert!(matches!(
            service.upsert("..", "x").await,
            Err(SettingsError::InvalidKey)
        ));
        assert!(matches!(
            service.remove(".").await,
            Err(SettingsError::InvalidKey)
        ));
        let state = service.get_by_key(".").await;
        assert!(matches!(state.error, Some(SettingsError::InvalidKey)));
        assert_eq!(service.get_value("..", "fallback").await, "fallback");

        assert!(notifier.seen.lock().unwrap().is_empty());
        assert!(!service.is_mutating());
    }

    #[tokio::test]
    async fn test_get_by_key_never_serves_stale_entry() {
        let mut api = MockSettingsApiPort::new();
        api.expect_fetch()
            .times(2)
            .returning(|key| Ok(Probe::Found(setting(key, "v"))));

        let (service, _) = service_with(api);
        service.get_by_key("storeName").await;
        service.get_by_key("storeName").await;
    }

    #[tokio::test]
    async fn test_list_all_reuses_cached_collection() {
        let mut api = MockSettingsApiPort::new();
        api.expect_list()
            .times(1)
            .returning(|| Ok(vec![setting("storeName", "Kerzenwelt")]));

        let (service, _) = service_with(api);
        let first = service.list_all().await;
        let second = service.list_all().await;

        assert_eq!(first.data.as_ref().map(Vec::len), Some(1));
        assert_eq!(first.data, second.data);
    }

    #[tokio::test]
    async fn test_read_errors_are_state_not_panics() {
        let mut api = MockSettingsApiPort::new();
        api.expect_list().returning(|| {
            Err(ApiError::Network {
                message: "offline".to_string(),
            })
        });
        api.expect_fetch().returning(|_| {
            Err(ApiError::Network {
                message: "offline".to_string(),
            })
        });

        let (service, _) = service_with(api);
        let list = service.list_all().await;
        assert!(list.is_error());
        assert!(matches!(list.error, Some(SettingsError::Network { .. })));

        assert_eq!(service.get_value("storeName", "fallback").await, "fallback");
    }

    #[tokio::test]
    async fn test_value_now_reads_snapshot_only() {
        let mut api = MockSettingsApiPort::new();
        api.expect_fetch()
            .times(1)
            .returning(|key| Ok(Probe::Found(setting(key, "Kerzenwelt"))));

        let (service, _) = service_with(api);
        assert_eq!(service.value_now("storeName", "…"), "…");

        service.get_by_key("storeName").await;
        assert_eq!(service.value_now("storeName", "…"), "Kerzenwelt");
    }

    #[tokio::test]
    async fn test_is_mutating_resets_after_write() {
        let service = SettingsService::new(
            Arc::new({
                let mut api = MockSettingsApiPort::new();
                api.expect_delete().returning(|_| Ok(()));
                api
            }),
            Arc::new(QueryCache::new()),
            Arc::new(NoopNotifier::new()),
        );

        assert!(!service.is_mutating());
        service.remove("storeName").await.unwrap();
        assert!(!service.is_mutating());
    }

    #[test]
    fn test_default_config_matches_presets() {
        let config = SettingsServiceConfig::default();
        assert_eq!(config.collection_options(), QueryOptions::collection());
        assert_eq!(config.entry_options(), QueryOptions::live());
    }
}
