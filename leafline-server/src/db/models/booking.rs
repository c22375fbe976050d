//! Delivery Booking Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::{GeoPoint, TimeBlock};

/// Receipt of a successful slot reservation
///
/// Written in the same flow that advances the slot counter; the order
/// subsystem references `booking_no` when it assembles the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryBooking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Snowflake-style booking number, stable across systems
    pub booking_no: i64,
    pub customer_id: String,
    pub date: NaiveDate,
    pub time_block: TimeBlock,
    pub customer_location: GeoPoint,
    pub created_at: i64,
}
