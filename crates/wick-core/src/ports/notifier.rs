//! User notification port.
//!
//! The access layer reports the outcome of writes to the person at the
//! keyboard (a toast in the admin UI, a stderr line in the CLI). Delivery is
//! advisory: implementations must not block and cannot fail the write.

use serde::{Deserialize, Serialize};

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// A user-facing message with a title and a longer description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Success)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Error)
    }
}

/// Trait for surfacing notifications to the user.
///
/// # Implementations
///
/// - `NoopNotifier` - For tests and headless contexts
/// - Adapter-specific implementations (terminal output, UI toasts, etc.)
pub trait Notifier: Send + Sync {
    /// Show a notification.
    ///
    /// This method should not block.
    fn notify(&self, notification: Notification);
}

/// A notifier that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl NoopNotifier {
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: Notification) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_constructors_set_severity() {
        assert_eq!(
            Notification::success("Saved", "storeName").severity,
            Severity::Success
        );
        assert_eq!(
            Notification::error("Failed", "boom").severity,
            Severity::Error
        );
    }

    #[test]
    fn test_noop_notifier_behind_arc() {
        let notifier: Arc<dyn Notifier> = Arc::new(NoopNotifier::new());
        notifier.notify(Notification::success("Saved", "storeName"));
    }
}
