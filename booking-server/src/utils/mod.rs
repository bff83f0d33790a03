//! Utilities

pub mod logger;

pub use logger::{init_logger, init_logger_with_file};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
