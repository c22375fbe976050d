//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`delivery`] - 配送时段查询与预订
//! - [`store_settings`] - 门店配送配置 (管理端)

use axum::Router;

use crate::core::ServerState;

pub mod delivery;
pub mod health;
pub mod store_settings;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(delivery::router())
        .merge(store_settings::router())
}
