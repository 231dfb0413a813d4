use std::time::Instant;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::{Config, DatabaseMode, Result, ServerError};
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Clone 实现浅拷贝 (`Surreal<Db>` 内部为 Arc)，可直接作为 axum State。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式文档数据库 |
/// | started_at | Instant | 启动时间 (健康检查) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 启动时间
    pub started_at: Instant,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 代替
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self {
            config,
            db,
            started_at: Instant::now(),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (memory 或 work_dir/database/bookings.db)
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_service = match config.database {
            DatabaseMode::Memory => DbService::memory().await,
            DatabaseMode::RocksDb => {
                let db_path = config.database_dir().join("bookings.db");
                DbService::rocksdb(&db_path).await
            }
        }
        .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 运行时间 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::BookingRepository;
    use shared::models::BookingCreate;

    #[tokio::test]
    async fn test_rocksdb_state_under_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::in_memory(0);
        config.work_dir = dir.path().to_string_lossy().into_owned();
        config.database = DatabaseMode::RocksDb;

        let state = ServerState::initialize(&config).await.unwrap();
        assert!(config.database_dir().join("bookings.db").exists());

        let repo = BookingRepository::new(state.get_db());
        let created = repo
            .create(BookingCreate {
                user_name: "Asha".to_string(),
                user_age: None,
                user_number: "5551234".to_string(),
                destination: "Goa".to_string(),
                travel_date: "2025-01-10".to_string(),
                return_date: "2025-01-15".to_string(),
                ticket_quantity: 1,
                total_price: 100.0,
            })
            .await
            .unwrap();

        let found = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.user_age, None);
        assert_eq!(found.destination, "Goa");
    }
}
