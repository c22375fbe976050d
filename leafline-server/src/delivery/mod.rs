//! 配送时段子系统
//!
//! # 结构
//!
//! - [`engine`] - 可订性报告（只读纯计算）
//! - [`booking`] - 时段预订（写路径，复用相同闸门）
//! - [`geo`] - 大圆距离
//!
//! 两个全局常量约束一条配送线路：一个司机一个时段最多接
//! [`SLOT_CAPACITY`] 单，且所有订单都落在首单锚点
//! [`ANCHOR_RADIUS_MILES`] 英里半径内。

pub mod booking;
pub mod engine;
pub mod geo;

/// Orders one driver can take in a single 4-hour window
pub const SLOT_CAPACITY: i64 = 12;

/// Radius around a slot's anchor that keeps a delivery run coherent
pub const ANCHOR_RADIUS_MILES: f64 = 8.0;

pub use booking::{BookingConfirmation, BookingService};
pub use engine::{
    AvailabilityStatus, DayAvailability, DeliveryScheduleEngine, SlotAvailability,
    availability_report, build_horizon, resolve_slot,
};
pub use geo::haversine_miles;
