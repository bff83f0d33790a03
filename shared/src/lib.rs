//! Shared types for the booking engine
//!
//! Common types used across crates: domain models, error types,
//! and utility helpers.

pub mod error;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
