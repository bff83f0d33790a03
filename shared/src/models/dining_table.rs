//! Dining Table Model

use super::location::Location;
use serde::{Deserialize, Serialize};

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    /// Human-facing table number, unique
    pub table_number: String,
    pub location: Location,
    /// Number of seats
    pub size: i32,
    #[serde(default)]
    pub is_occupied: bool,
}

impl DiningTable {
    /// Whether this table can seat a party of the given size at the location
    pub fn fits(&self, location: Location, party_size: i32) -> bool {
        self.location == location && self.size >= party_size
    }
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub table_number: String,
    pub location: Location,
    pub size: i32,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
}
