use crate::domain::Notification;

/// User-facing notification surface. Showing a new notification replaces the previous one.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn dismiss(&self) {}
}
