//! Waitlist Model

use super::location::Location;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Waitlist entry status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum WaitlistStatus {
    #[default]
    Waiting,
    Called,
    Seated,
    Cancelled,
}

impl WaitlistStatus {
    /// Seated and Cancelled entries leave the queue for good
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Seated | Self::Cancelled)
    }
}

/// Waitlist entry entity
///
/// Created when a walk-in finds no table. When the party is finally seated
/// the entry itself becomes the seating record — no Reservation row is
/// created for promoted waitlist parties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WaitlistEntry {
    pub id: i64,
    pub customer_id: i64,
    pub adults: i32,
    pub children: i32,
    #[serde(default)]
    pub child_seat_required: bool,
    pub location: Location,
    pub status: WaitlistStatus,
    pub notes: Option<String>,
    /// Staff estimate, minutes
    pub estimated_wait_time: Option<i32>,
    /// Table held once the entry is Seated
    pub table_id: Option<i64>,
    /// Unix milliseconds
    pub created_at: Timestamp,
    pub called_at: Option<Timestamp>,
    pub seated_at: Option<Timestamp>,
}

impl WaitlistEntry {
    /// Total covers for table matching
    pub fn party_size(&self) -> i32 {
        self.adults + self.children
    }

    /// Minutes this party has waited so far
    pub fn waited_minutes(&self, now_millis: i64) -> i64 {
        ((now_millis - self.created_at) / 60_000).max(0)
    }
}

/// Direct waitlist-add payload (staff action)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistRequest {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub adults: i32,
    pub children: i32,
    #[serde(default)]
    pub child_seat_required: bool,
    pub location: Location,
    pub notes: Option<String>,
    pub estimated_wait_time: Option<i32>,
}

impl WaitlistRequest {
    /// Total covers for table matching
    pub fn party_size(&self) -> i32 {
        self.adults + self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(!WaitlistStatus::Waiting.is_terminal());
        assert!(!WaitlistStatus::Called.is_terminal());
        assert!(WaitlistStatus::Seated.is_terminal());
        assert!(WaitlistStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_waited_minutes() {
        let entry = WaitlistEntry {
            id: 1,
            customer_id: 1,
            adults: 2,
            children: 0,
            child_seat_required: false,
            location: Location::Indoor,
            status: WaitlistStatus::Waiting,
            notes: None,
            estimated_wait_time: None,
            table_id: None,
            created_at: 1_000_000,
            called_at: None,
            seated_at: None,
        };
        assert_eq!(entry.waited_minutes(1_000_000 + 25 * 60_000), 25);
        // Clock skew never reports negative waits
        assert_eq!(entry.waited_minutes(0), 0);
    }
}
