//! Data models
//!
//! Shared between the booking engine and any surface embedding it.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix
//! milliseconds.

pub mod customer;
pub mod dining_table;
pub mod location;
pub mod reservation;
pub mod waitlist;

// Re-exports
pub use customer::*;
pub use dining_table::*;
pub use location::*;
pub use reservation::*;
pub use waitlist::*;
