//! User-facing notifications.
//!
//! Store and upload operations report their outcome through a [`Notifier`].
//! Delivery is fire-and-forget: nothing consumes a return value.
//!
//! Components:
//! - `notifier`: the `Notifier` trait and the `Notification` payload.
//! - `log_notifier`: forwards notifications to the `log` facade.
//! - `feed`: bounded in-memory history, exposed over HTTP.

pub mod feed;
pub mod log_notifier;
pub mod notifier;

pub use feed::NotificationFeed;
pub use log_notifier::LogNotifier;
pub use notifier::{Notification, Notifier, Severity};
