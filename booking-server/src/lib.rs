//! Booking Server - 餐厅座位与预订核心
//!
//! # 架构概述
//!
//! 本模块是预订引擎的主入口，提供以下核心功能：
//!
//! - **座位核心** (`seating`): 预订状态机、桌台匹配、队列号分配
//! - **数据库** (`db`): SQLite 连接池与仓储层
//! - **通知** (`services/notify`): fire-and-forget 事件分发
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态
//! ├── db/            # 数据库层 (连接池、迁移、仓储)
//! ├── seating/       # 座位分配核心 (状态机、匹配器、序号)
//! ├── services/      # 通知分发
//! └── utils/         # 日志、错误再导出
//! ```

pub mod core;
pub mod db;
pub mod seating;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, ServerState};
pub use db::DbService;
pub use seating::{
    BookingOutcome, Promotion, SeatingError, SeatingManager, SeatingResult, SeatingStatus,
};
pub use services::{BroadcastNotifier, Notification, Notifier, NotifyEvent};

// Re-export unified error types from shared
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::{init_logger, init_logger_with_file};
