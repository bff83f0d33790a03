use std::sync::Arc;

use shared::error::{AppError, ErrorCode};
use tokio::sync::broadcast;

use crate::core::Config;
use crate::db::DbService;
use crate::seating::SeatingManager;
use crate::services::{BroadcastNotifier, Notification};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是预订引擎的组合根，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | seating | Arc<SeatingManager> | 座位分配核心 |
/// | notifier | Arc<BroadcastNotifier> | 通知分发 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
    /// 座位分配核心
    seating: Arc<SeatingManager>,
    /// 通知分发器
    notifier: Arc<BroadcastNotifier>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/booking.db)
    /// 3. 通知分发器和座位管理器
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config.ensure_work_dir_structure().map_err(|e| {
            AppError::with_message(
                ErrorCode::ConfigError,
                format!("Failed to create work directory structure: {e}"),
            )
        })?;

        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::assemble(config.clone(), db))
    }

    /// 初始化内存数据库状态 (测试用)
    pub async fn initialize_in_memory(config: &Config) -> Result<Self, AppError> {
        let db = DbService::open_in_memory().await?;
        Ok(Self::assemble(config.clone(), db))
    }

    fn assemble(config: Config, db: DbService) -> Self {
        let notifier = Arc::new(BroadcastNotifier::new());
        let seating = Arc::new(SeatingManager::new(
            db.pool.clone(),
            notifier.clone(),
            config.timezone,
        ));
        Self {
            config,
            db,
            seating,
            notifier,
        }
    }

    /// 获取座位管理器
    pub fn seating(&self) -> &Arc<SeatingManager> {
        &self.seating
    }

    /// 获取通知分发器
    pub fn notifier(&self) -> &Arc<BroadcastNotifier> {
        &self.notifier
    }

    /// 订阅通知事件
    pub fn subscribe_notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }
}
