//! Leafline Delivery Server - 大麻零售电商平台的配送子系统节点
//!
//! # 架构概述
//!
//! 本模块是配送服务的主入口，提供以下核心功能：
//!
//! - **可订性引擎** (`delivery`): 时段闸门 + 运力 + 地理锚定的纯计算
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): 平台 JWT 令牌验证
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! leafline-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、权限
//! ├── api/           # HTTP 路由和处理器
//! ├── delivery/      # 配送时段引擎
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod delivery;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use delivery::{BookingService, DeliveryScheduleEngine};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __                 ______    __
   / /   ___  ____ _  / __/ /   (_)___  ___
  / /   / _ \/ __ `/ / /_/ /   / / __ \/ _ \
 / /___/  __/ /_/ / / __/ /___/ / / / /  __/
/_____/\___/\__,_/ /_/ /_____/_/_/ /_/\___/
    "#
    );
}
