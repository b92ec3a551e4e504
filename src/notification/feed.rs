use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use log::warn;

use crate::notification::log_notifier::LogNotifier;
use crate::notification::notifier::{Notification, Notifier};

/// Keeps the most recent notifications so a client can poll them.
///
/// Oldest entries are dropped once `capacity` is reached. Every notification
/// is also forwarded to the log.
pub struct NotificationFeed {
    entries: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl NotificationFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    fn entries(&self) -> MutexGuard<'_, VecDeque<Notification>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Notification feed lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Newest last.
    pub fn recent(&self) -> Vec<Notification> {
        self.entries().iter().cloned().collect()
    }

    pub fn drain(&self) -> Vec<Notification> {
        self.entries().drain(..).collect()
    }
}

impl Notifier for NotificationFeed {
    fn notify(&self, notification: Notification) {
        LogNotifier.notify(notification.clone());
        let mut entries = self.entries();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(notification);
    }
}
