use log::{error, info};

use crate::notification::notifier::{Notification, Notifier, Severity};

/// Writes every notification to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => error!("{}: {}", notification.title, notification.message),
            Severity::Info | Severity::Success => {
                info!("{}: {}", notification.title, notification.message)
            }
        }
    }
}
