//! Delivery API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{DeliveryBooking, TimeBlock};
use crate::delivery::{BookingConfirmation, BookingService, DayAvailability, DeliveryScheduleEngine};
use crate::utils::validation::{COORDINATES_REQUIRED, parse_coordinates};
use crate::utils::{AppError, AppResult, time};

/// POST /delivery/slots - 按顾客坐标计算滚动 2–3 天的可订报告
///
/// 请求体 `{ lat, lng }`。缺失或非数字坐标在任何时段计算之前就被拒绝。
pub async fn query_slots(
    State(state): State<ServerState>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<Vec<DayAvailability>>> {
    let customer = parse_coordinates(&payload)?;

    let engine = DeliveryScheduleEngine::new(state.db.clone());
    let now = time::store_now(state.config.timezone);
    let report = engine.availability(&customer, now).await?;
    Ok(Json(report))
}

/// Booking request payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    /// YYYY-MM-DD
    pub date: String,
    pub time_block: TimeBlock,
}

/// POST /delivery/bookings - 预订一个 (日期, 时段)
///
/// 冲突（名额被抢/抢锚失败）返回 409，顾客端应刷新可订报告后重试；
/// 闸门拒绝（已满/超出配送区/时段已过）返回 422。
pub async fn create_booking(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<BookingRequest>,
) -> AppResult<Json<BookingConfirmation>> {
    let customer = match (payload.lat, payload.lng) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
            crate::db::models::GeoPoint { lat, lng }
        }
        _ => return Err(AppError::validation(COORDINATES_REQUIRED)),
    };
    let date = time::parse_date(&payload.date)?;

    let service = BookingService::new(state.db.clone());
    let now = time::store_now(state.config.timezone);
    let confirmation = service
        .book(&current_user.id, &customer, date, payload.time_block, now)
        .await?;
    Ok(Json(confirmation))
}

/// Booking history entry (wire form)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub booking_no: i64,
    pub date: String,
    pub day_name: String,
    pub time: String,
    pub created_at: i64,
}

impl From<&DeliveryBooking> for BookingSummary {
    fn from(booking: &DeliveryBooking) -> Self {
        Self {
            booking_no: booking.booking_no,
            date: time::format_date(booking.date),
            day_name: time::day_name(booking.date),
            time: booking.time_block.label().to_string(),
            created_at: booking.created_at,
        }
    }
}

/// GET /delivery/bookings - 当前顾客的预订历史
pub async fn list_bookings(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<BookingSummary>>> {
    let service = BookingService::new(state.db.clone());
    let bookings = service.bookings_for_customer(&current_user.id).await?;
    Ok(Json(bookings.iter().map(BookingSummary::from).collect()))
}
