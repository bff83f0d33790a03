//! Services
//!
//! External collaborators the seating core talks to through narrow
//! interfaces.

pub mod notify;

pub use notify::{BroadcastNotifier, Notification, Notifier, NotifyEvent};
