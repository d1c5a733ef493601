use std::io::Write;

use crate::application::ports::Notifier;
use crate::domain::{Notification, NotificationLevel};

/// Prints notifications to stderr, keeping stdout for the answer itself.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(level = %notification.level, message = %notification.message, "Notification");

        let marker = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
            NotificationLevel::Loading => "...",
        };

        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "[{}] {}", marker, notification.message);
    }
}
