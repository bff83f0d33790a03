//! Notification Dispatcher
//!
//! Fire-and-forget events emitted after a state change is committed. The
//! seating manager never awaits delivery and never sees a delivery failure:
//! a dropped notification is logged and swallowed here, it must not fail or
//! roll back the booking that produced it.

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;

/// Broadcast channel capacity
///
/// Sized for a full day of bookings with slow consumers; lagging receivers
/// see `RecvError::Lagged`, the sender never blocks.
const EVENT_CHANNEL_CAPACITY: usize = 4096;

/// Events the seating core emits
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifyEvent {
    /// A reservation was created (seated immediately or queued)
    ReservationConfirmed {
        reservation_id: i64,
        customer_name: String,
        phone_number: String,
        queue_number: i32,
        table_number: Option<String>,
    },
    /// A party joined the waitlist
    WaitlistAdded {
        entry_id: i64,
        customer_name: String,
        phone_number: String,
        estimated_wait_time: Option<i32>,
    },
    /// A table is ready for a waiting party
    TableReady {
        entry_id: i64,
        customer_name: String,
        phone_number: String,
        table_number: Option<String>,
    },
}

impl NotifyEvent {
    /// Event kind key, used for per-kind sequence numbers
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReservationConfirmed { .. } => "reservation_confirmed",
            Self::WaitlistAdded { .. } => "waitlist_added",
            Self::TableReady { .. } => "table_ready",
        }
    }
}

/// A dispatched event with its per-kind sequence number
///
/// Consumers use the sequence to detect gaps after lagging behind the
/// broadcast channel.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Notification {
    pub seq: u64,
    #[serde(flatten)]
    pub event: NotifyEvent,
}

/// Notification sink the seating manager dispatches into
///
/// Implementations must be non-blocking and infallible from the caller's
/// point of view.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: NotifyEvent);
}

/// Per-kind sequence numbers
///
/// DashMap gives lock-free concurrent increments; each event kind keeps an
/// independent monotonic counter.
#[derive(Debug, Default)]
struct EventSequences {
    versions: DashMap<&'static str, u64>,
}

impl EventSequences {
    fn increment(&self, kind: &'static str) -> u64 {
        let mut entry = self.versions.entry(kind).or_insert(0);
        *entry += 1;
        *entry
    }
}

/// Broadcast-channel notifier
///
/// Fans events out to any number of subscribers (SMS/email workers, UI
/// pushers). Send failures mean nobody is listening right now — logged at
/// warn and dropped.
#[derive(Debug)]
pub struct BroadcastNotifier {
    event_tx: broadcast::Sender<Notification>,
    sequences: EventSequences,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            event_tx,
            sequences: EventSequences::default(),
        }
    }

    /// Subscribe to dispatched notifications
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.event_tx.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, event: NotifyEvent) {
        let seq = self.sequences.increment(event.kind());
        tracing::debug!(kind = event.kind(), seq, "Dispatching notification");
        if self.event_tx.send(Notification { seq, event }).is_err() {
            tracing::warn!("Notification dropped: no active receivers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_ready(entry_id: i64) -> NotifyEvent {
        NotifyEvent::TableReady {
            entry_id,
            customer_name: "Ana".into(),
            phone_number: "+34600000001".into(),
            table_number: Some("T1".into()),
        }
    }

    #[tokio::test]
    async fn test_subscriber_receives_events() {
        let notifier = BroadcastNotifier::new();
        let mut rx = notifier.subscribe();

        notifier.notify(table_ready(1));
        let received = rx.recv().await.unwrap();
        assert_eq!(received.seq, 1);
        assert_eq!(received.event.kind(), "table_ready");
    }

    #[tokio::test]
    async fn test_sequences_are_per_kind() {
        let notifier = BroadcastNotifier::new();
        let mut rx = notifier.subscribe();

        notifier.notify(table_ready(1));
        notifier.notify(table_ready(2));
        notifier.notify(NotifyEvent::WaitlistAdded {
            entry_id: 3,
            customer_name: "Luis".into(),
            phone_number: "+34600000002".into(),
            estimated_wait_time: Some(15),
        });

        assert_eq!(rx.recv().await.unwrap().seq, 1);
        assert_eq!(rx.recv().await.unwrap().seq, 2);
        // Independent counter for the other kind
        assert_eq!(rx.recv().await.unwrap().seq, 1);
    }

    #[test]
    fn test_notify_without_receivers_is_swallowed() {
        let notifier = BroadcastNotifier::new();
        // No subscriber: must not panic or error
        notifier.notify(table_ready(1));
    }

    #[test]
    fn test_wire_shape() {
        let notification = Notification {
            seq: 3,
            event: table_ready(7),
        };
        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["seq"], 3);
        assert_eq!(json["type"], "table_ready");
        assert_eq!(json["entry_id"], 7);
        assert_eq!(json["table_number"], "T1");
    }
}
