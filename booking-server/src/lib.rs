//! Booking Server - 旅行预订后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 文档存储 (booking / contact / hotel)
//! - **HTTP API** (`api`): 表单登记与预订查询接口
//! - **中间件** (`middleware`): 请求日志
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── services/      # 路由组装
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志中间件
//! ├── utils/         # 错误类型、日志
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, DatabaseMode, Server, ServerError, ServerState};
pub use services::HttpService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境
///
/// 1. 加载 `.env` (不存在时忽略)
/// 2. 读取配置
/// 3. 初始化日志 (LOG_DIR 不存在时先创建)
pub fn setup_environment() -> core::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| ServerError::Config(format!("LOG_DIR {}: {}", dir, e)))?;
    }

    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____              __   _
   / __ )____  ____  / /__(_)___  ____ _
  / __  / __ \/ __ \/ //_/ / __ \/ __ `/
 / /_/ / /_/ / /_/ / ,< / / / / / /_/ /
/_____/\____/\____/_/|_/_/_/ /_/\__, /
                               /____/
    "#
    );
}
