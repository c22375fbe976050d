//! Delivery Slot Availability Engine
//!
//! 给定当前门店本地时间、门店配置、已读出的时段记录和顾客坐标，
//! 计算滚动 2–3 天内每个 (日期, 时段) 的可订状态。
//!
//! 纯计算：不产生副作用，按请求独立执行。三道互相独立的否决闸门
//! 按固定优先级求值（先终止者生效）：
//!
//! 1. 时段已过（仅当天）
//! 2. 运力已满（优先于地理围栏）
//! 3. 锚点距离超出配送半径

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Timelike};
use chrono_tz::Tz;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::geo::haversine_miles;
use super::{ANCHOR_RADIUS_MILES, SLOT_CAPACITY};
use crate::db::models::{DeliverySlot, GeoPoint, SlotStatus, StoreSettings, TimeBlock};
use crate::db::repository::{DeliverySlotRepository, StoreSettingsRepository};
use crate::utils::{AppResult, time};

/// Reason shown when a slot hit driver capacity
pub const FULLY_BOOKED_REASON: &str = "Driver Fully Booked";

/// Reason shown when the customer sits outside an anchored slot's zone
pub fn zone_mismatch_reason(distance_miles: f64) -> String {
    format!("Zone mismatch ({distance_miles:.1} miles from route)")
}

/// Customer-facing verdict for one (day, time block) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AvailabilityStatus {
    /// Bookable by this customer
    Open,
    /// Window already passed today
    Unavailable,
    /// Driver capacity reached
    Full,
    /// Anchored to a zone this customer is outside of
    Locked,
}

/// One time block's verdict
#[derive(Debug, Clone, Serialize)]
pub struct SlotAvailability {
    /// Human label including the hour range
    pub time: String,
    pub status: AvailabilityStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// One horizon day with its three block verdicts (Morning → Evening)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    /// YYYY-MM-DD
    pub date: String,
    /// Long English weekday name
    pub day_name: String,
    pub slots: Vec<SlotAvailability>,
}

/// Build the rolling horizon of bookable dates.
///
/// Today appears only when same-day delivery is on and the local hour is
/// still before the cutoff; tomorrow and the day after are always present,
/// in chronological order.
pub fn build_horizon(today: NaiveDate, hour: u32, settings: &StoreSettings) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(3);
    if settings.same_day_delivery_enabled && hour < u32::from(settings.delivery_cutoff_hour) {
        days.push(today);
    }
    days.push(today + Duration::days(1));
    days.push(today + Duration::days(2));
    days
}

/// Resolve one (day, time block) verdict.
///
/// `today_hour` is `Some(local hour)` only when the day under evaluation is
/// today; the time-passed gate never consults persisted state.
pub fn resolve_slot(
    block: TimeBlock,
    record: Option<&DeliverySlot>,
    customer: &GeoPoint,
    today_hour: Option<u32>,
) -> SlotAvailability {
    // 时段已过：结束小时是含边界的（正好到点即不可订）
    if let Some(hour) = today_hour
        && hour >= block.end_hour()
    {
        return SlotAvailability {
            time: block.label().to_string(),
            status: AvailabilityStatus::Unavailable,
            reason: None,
        };
    }

    // 无记录 = 尚无预订，无任何约束
    let Some(record) = record else {
        return SlotAvailability {
            time: block.label().to_string(),
            status: AvailabilityStatus::Open,
            reason: None,
        };
    };

    // 运力已满：无论地理位置如何都关闭
    if record.current_order_count >= SLOT_CAPACITY {
        return SlotAvailability {
            time: block.label().to_string(),
            status: AvailabilityStatus::Full,
            reason: Some(FULLY_BOOKED_REASON.to_string()),
        };
    }

    // 地理围栏：已锚定的时段只对锚点 8 英里内的顾客继续开放
    if record.status == SlotStatus::Anchored
        && let Some(anchor) = &record.anchor
    {
        let distance = haversine_miles(customer, anchor);
        if distance > ANCHOR_RADIUS_MILES {
            return SlotAvailability {
                time: block.label().to_string(),
                status: AvailabilityStatus::Locked,
                reason: Some(zone_mismatch_reason(distance)),
            };
        }
    }

    SlotAvailability {
        time: block.label().to_string(),
        status: AvailabilityStatus::Open,
        reason: None,
    }
}

/// Assemble the full report: every horizon day with all three blocks in
/// fixed Morning → Afternoon → Evening order.
pub fn availability_report(
    now: DateTime<Tz>,
    settings: &StoreSettings,
    slots: &HashMap<(NaiveDate, TimeBlock), DeliverySlot>,
    customer: &GeoPoint,
) -> Vec<DayAvailability> {
    let today = now.date_naive();
    let hour = now.hour();

    build_horizon(today, hour, settings)
        .into_iter()
        .map(|date| {
            let today_hour = (date == today).then_some(hour);
            let day_slots = TimeBlock::ALL
                .iter()
                .map(|&block| resolve_slot(block, slots.get(&(date, block)), customer, today_hour))
                .collect();
            DayAvailability {
                date: time::format_date(date),
                day_name: time::day_name(date),
                slots: day_slots,
            }
        })
        .collect()
}

/// Availability engine wired to the repositories.
///
/// Reads settings (creating the default singleton when absent) and the
/// horizon's slot records, then runs the pure report over them. The read
/// path tolerates slightly stale data; the booking path re-validates.
#[derive(Clone)]
pub struct DeliveryScheduleEngine {
    settings_repo: StoreSettingsRepository,
    slot_repo: DeliverySlotRepository,
}

impl DeliveryScheduleEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            settings_repo: StoreSettingsRepository::new(db.clone()),
            slot_repo: DeliverySlotRepository::new(db),
        }
    }

    /// Compute the availability report for one customer at `now`
    pub async fn availability(
        &self,
        customer: &GeoPoint,
        now: DateTime<Tz>,
    ) -> AppResult<Vec<DayAvailability>> {
        let settings = self.settings_repo.get_or_create().await?;

        let horizon = build_horizon(now.date_naive(), now.hour(), &settings);
        let records = self.slot_repo.find_for_dates(&horizon).await?;
        let slots: HashMap<(NaiveDate, TimeBlock), DeliverySlot> = records
            .into_iter()
            .map(|slot| ((slot.date, slot.time_block), slot))
            .collect();

        Ok(availability_report(now, &settings, &slots, customer))
    }
}
