use postmind_core::ApiError;

use crate::ui::notifications::{Notification, NotificationQueue};

/// Status bar notifications, plus the wording used for backend failures.
pub struct NotificationManager {
    notifications: NotificationQueue,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: NotificationQueue::new(),
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Report a failed request. A lost session gets its own hint.
    pub fn notify_api_error(&mut self, context: &str, error: &ApiError) {
        let notification = if error.is_unauthenticated() {
            Notification::warning(format!(
                "{}: session expired, press Ctrl+L to sign in again",
                context
            ))
        } else {
            Notification::error(format!("{}: {}", context, error))
        };
        self.notify(notification);
    }

    /// Poll and update notification timers (call each tick)
    pub fn tick(&mut self) {
        self.notifications.tick();
    }

    pub fn dismiss(&mut self) {
        self.notifications.dismiss();
    }

    pub fn current(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}
