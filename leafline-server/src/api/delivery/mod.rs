//! Delivery API 模块
//!
//! 顾客端配送接口：时段可订性查询、时段预订、预订历史。
//! 全部要求携带有效访问令牌（由全局 require_auth 中间件保证）。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/delivery", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/slots", post(handler::query_slots))
        .route(
            "/bookings",
            get(handler::list_bookings).post(handler::create_booking),
        )
}
