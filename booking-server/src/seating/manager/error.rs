use crate::db::repository::RepoError;
use shared::error::{AppError, ErrorCode};
use shared::models::{ReservationStatus, WaitlistStatus};
use thiserror::Error;

/// Seating manager errors
#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(i64),

    #[error("Reservation {id} is already {status:?}")]
    ReservationFinalized { id: i64, status: ReservationStatus },

    #[error("Reservation {id} cannot {action} from {status:?}")]
    InvalidTransition {
        id: i64,
        status: ReservationStatus,
        action: &'static str,
    },

    #[error("Waitlist entry not found: {0}")]
    WaitlistEntryNotFound(i64),

    #[error("Waitlist entry {id} is already {status:?}")]
    WaitlistEntryFinalized { id: i64, status: WaitlistStatus },

    #[error("Customer not found: {0}")]
    CustomerNotFound(i64),

    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error("Table is already occupied: {0}")]
    TableOccupied(String),

    #[error("Table is in use: {0}")]
    TableInUse(String),

    #[error("Table number already exists: {0}")]
    TableNumberExists(String),

    #[error("No tables for slot {date} {time}")]
    SchedulingConflict { date: String, time: String },

    #[error("No {location} table can seat a party of {party_size}")]
    NoCapacity { location: String, party_size: i32 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// 将存储错误分类（队列号唯一索引冲突需要单独识别）
fn classify_duplicate(msg: &str) -> SeatingError {
    if msg.contains("queue_number") {
        // UNIQUE (queue_day, queue_number) backstop fired: two writers got
        // the same number, which means the allocation lock was bypassed
        tracing::error!(error = %msg, "Queue number collision, allocation lock violated");
        return SeatingError::Conflict(format!("Queue number already taken: {msg}"));
    }
    SeatingError::Conflict(msg.to_string())
}

impl From<RepoError> for SeatingError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => SeatingError::NotFound(msg),
            RepoError::Duplicate(msg) => classify_duplicate(&msg),
            RepoError::Database(msg) => SeatingError::Storage(msg),
            RepoError::Validation(msg) => SeatingError::InvalidInput(msg),
        }
    }
}

impl SeatingError {
    /// The unified error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::ValidationFailed,
            Self::InvalidFormat(_) => ErrorCode::InvalidFormat,
            Self::ReservationNotFound(_) => ErrorCode::ReservationNotFound,
            Self::ReservationFinalized { .. } => ErrorCode::ReservationFinalized,
            Self::InvalidTransition { .. } => ErrorCode::InvalidStatusTransition,
            Self::WaitlistEntryNotFound(_) => ErrorCode::WaitlistEntryNotFound,
            Self::WaitlistEntryFinalized { .. } => ErrorCode::WaitlistEntryFinalized,
            Self::CustomerNotFound(_) => ErrorCode::CustomerNotFound,
            Self::TableNotFound(_) => ErrorCode::TableNotFound,
            Self::TableOccupied(_) => ErrorCode::TableOccupied,
            Self::TableInUse(_) => ErrorCode::TableHasReservations,
            Self::TableNumberExists(_) => ErrorCode::TableNumberExists,
            Self::SchedulingConflict { .. } => ErrorCode::SchedulingConflict,
            Self::NoCapacity { .. } => ErrorCode::NoCapacity,
            Self::Conflict(msg) if msg.contains("queue_number") => ErrorCode::QueueNumberConflict,
            Self::Conflict(_) => ErrorCode::AlreadyExists,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Storage(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<SeatingError> for AppError {
    fn from(err: SeatingError) -> Self {
        let code = err.code();
        if code == ErrorCode::DatabaseError {
            tracing::error!(error = %err, "Storage error surfaced from seating core");
        }
        AppError::with_message(code, err.to_string())
    }
}

pub type SeatingResult<T> = Result<T, SeatingError>;
