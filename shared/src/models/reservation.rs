//! Reservation Model

use super::location::Location;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Reservation status
///
/// Stored as TEXT with the exact strings below; `No-show` keeps its hyphen
/// for compatibility with existing front-of-house tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ReservationStatus {
    #[default]
    Queued,
    Seated,
    Completed,
    Cancelled,
    #[serde(rename = "No-show")]
    #[cfg_attr(feature = "db", sqlx(rename = "No-show"))]
    NoShow,
}

impl ReservationStatus {
    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    /// Active states count toward table/slot commitments
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Queued | Self::Seated)
    }
}

/// How the booking reached us
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ReservationType {
    #[serde(rename = "walk-in")]
    #[cfg_attr(feature = "db", sqlx(rename = "walk-in"))]
    WalkIn,
    #[default]
    #[serde(rename = "phone")]
    #[cfg_attr(feature = "db", sqlx(rename = "phone"))]
    Phone,
    #[serde(rename = "online")]
    #[cfg_attr(feature = "db", sqlx(rename = "online"))]
    Online,
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub customer_id: i64,
    /// Non-null only while the party holds a table
    pub table_id: Option<i64>,
    pub adults: i32,
    pub children: i32,
    #[serde(default)]
    pub child_seat_required: bool,
    pub status: ReservationStatus,
    /// Position within the business day, assigned once at creation
    pub queue_number: i32,
    /// Business-day the queue number belongs to (`YYYY-MM-DD`)
    pub queue_day: String,
    pub reservation_type: ReservationType,
    #[serde(default)]
    pub is_scheduled: bool,
    /// `YYYY-MM-DD`, scheduled bookings only
    pub reservation_date: Option<String>,
    /// `HH:MM`, scheduled bookings only
    pub reservation_time: Option<String>,
    pub notes: Option<String>,
    /// Unix milliseconds
    pub created_at: Timestamp,
    /// Unix milliseconds, set on transition to Seated
    pub seated_at: Option<Timestamp>,
}

impl Reservation {
    /// Total covers for table matching
    pub fn party_size(&self) -> i32 {
        self.adults + self.children
    }
}

/// Incoming booking payload (walk-in, phone, online or scheduled)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub adults: i32,
    pub children: i32,
    #[serde(default)]
    pub child_seat_required: bool,
    pub location: Location,
    pub notes: Option<String>,
    #[serde(default)]
    pub reservation_type: ReservationType,
    #[serde(default)]
    pub is_scheduled: bool,
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
}

impl BookingRequest {
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
        assert!(ReservationStatus::Queued.is_active());
        assert!(ReservationStatus::Seated.is_active());
        assert!(ReservationStatus::Completed.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(ReservationStatus::NoShow.is_terminal());
        assert!(!ReservationStatus::Queued.is_terminal());
    }

    #[test]
    fn test_no_show_wire_format() {
        let json = serde_json::to_string(&ReservationStatus::NoShow).unwrap();
        assert_eq!(json, "\"No-show\"");
    }

    #[test]
    fn test_reservation_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&ReservationType::WalkIn).unwrap(),
            "\"walk-in\""
        );
        let t: ReservationType = serde_json::from_str("\"online\"").unwrap();
        assert_eq!(t, ReservationType::Online);
    }
}
