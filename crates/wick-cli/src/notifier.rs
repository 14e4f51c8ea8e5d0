//! Terminal rendering of user notifications.

use std::io::Write;

use wick_core::{Notification, Notifier, Severity};

/// Prints notifications to stderr so stdout stays machine-readable.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let line = format_notification(&notification);
        // Ignore write errors on a closed stderr.
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }
}

pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Success => "✓",
        Severity::Info => "•",
        Severity::Error => "✗",
    };
    if notification.description.is_empty() {
        format!("{marker} {}", notification.title)
    } else {
        format!(
            "{marker} {}: {}",
            notification.title, notification.description
        )
    }
}
