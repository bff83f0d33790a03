//! Customer Model

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Customer entity
///
/// Created lazily on first booking, keyed by phone number. Never deleted by
/// the booking engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub notes: Option<String>,
    /// Unix milliseconds
    pub created_at: Timestamp,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub notes: Option<String>,
}
