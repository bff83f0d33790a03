//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ReservationNotFound
            | Self::WaitlistEntryNotFound
            | Self::CustomerNotFound
            | Self::TableNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::ReservationFinalized
            | Self::SchedulingConflict
            | Self::InvalidStatusTransition
            | Self::QueueNumberConflict
            | Self::WaitlistEntryFinalized
            | Self::NoCapacity
            | Self::PhoneNumberExists
            | Self::TableOccupied
            | Self::TableNumberExists
            | Self::TableHasReservations => StatusCode::CONFLICT,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
