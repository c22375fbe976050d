//! Slot reservation (order-placement path)
//!
//! 可订性报告是只读的；真正推进 `current_order_count`、设置锚点的是这里。
//! 预订前用新读的记录复跑与报告完全相同的闸门，再交给仓储层的原子
//! 预订语句。读检查与预订之间被别人抢走名额时返回可重试的 409。

use chrono::{DateTime, NaiveDate, Timelike};
use chrono_tz::Tz;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::engine::{FULLY_BOOKED_REASON, build_horizon, zone_mismatch_reason};
use super::geo::haversine_miles;
use super::{ANCHOR_RADIUS_MILES, SLOT_CAPACITY};
use crate::db::models::{DeliveryBooking, DeliverySlot, GeoPoint, SlotStatus, TimeBlock};
use crate::db::repository::{BookingRepository, DeliverySlotRepository, StoreSettingsRepository};
use crate::utils::ids::snowflake_id;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult, time};

/// Wire confirmation returned to the storefront after a successful booking
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_no: i64,
    pub date: String,
    pub day_name: String,
    /// Block label including the hour range
    pub time: String,
    pub slot_status: SlotStatus,
    /// Orders now committed to this delivery run
    pub orders_in_slot: i64,
}

impl BookingConfirmation {
    fn new(booking: &DeliveryBooking, slot: &DeliverySlot) -> Self {
        Self {
            booking_no: booking.booking_no,
            date: time::format_date(booking.date),
            day_name: time::day_name(booking.date),
            time: booking.time_block.label().to_string(),
            slot_status: slot.status,
            orders_in_slot: slot.current_order_count,
        }
    }
}

/// Reserves delivery slots under the same rules the availability report
/// shows to the customer.
#[derive(Clone)]
pub struct BookingService {
    settings_repo: StoreSettingsRepository,
    slot_repo: DeliverySlotRepository,
    booking_repo: BookingRepository,
}

impl BookingService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            settings_repo: StoreSettingsRepository::new(db.clone()),
            slot_repo: DeliverySlotRepository::new(db.clone()),
            booking_repo: BookingRepository::new(db),
        }
    }

    /// Book one (date, time block) slot for a customer.
    ///
    /// Gate order matches the availability report: horizon, time-passed,
    /// capacity, anchor distance. Races lost at the database boundary
    /// surface as 409 conflicts the storefront retries against a fresh
    /// availability report.
    pub async fn book(
        &self,
        customer_id: &str,
        customer: &GeoPoint,
        date: NaiveDate,
        block: TimeBlock,
        now: DateTime<Tz>,
    ) -> AppResult<BookingConfirmation> {
        let settings = self.settings_repo.get_or_create().await?;
        let today = now.date_naive();

        let horizon = build_horizon(today, now.hour(), &settings);
        if !horizon.contains(&date) {
            return Err(AppError::business_rule(
                "Selected date is not open for delivery booking",
            ));
        }

        if date == today && now.hour() >= block.end_hour() {
            return Err(AppError::business_rule(
                "Selected delivery window has already passed",
            ));
        }

        let slot = match self.slot_repo.find_by_date_block(date, block).await? {
            // First booking in this window: pin the anchor
            None => self.slot_repo.create_anchored(date, block, *customer).await?,
            Some(existing) => {
                if existing.current_order_count >= SLOT_CAPACITY {
                    return Err(AppError::business_rule(FULLY_BOOKED_REASON));
                }

                if existing.status == SlotStatus::Anchored
                    && let Some(anchor) = &existing.anchor
                {
                    let distance = haversine_miles(customer, anchor);
                    if distance > ANCHOR_RADIUS_MILES {
                        return Err(AppError::business_rule(zone_mismatch_reason(distance)));
                    }
                }

                let slot_id = existing
                    .id
                    .clone()
                    .ok_or_else(|| AppError::internal("Slot record missing id"))?;

                self.slot_repo.try_increment(&slot_id).await?.ok_or_else(|| {
                    AppError::conflict("Slot filled while booking; please pick another window")
                })?
            }
        };

        let booking = self
            .booking_repo
            .create(DeliveryBooking {
                id: None,
                booking_no: snowflake_id(),
                customer_id: customer_id.to_string(),
                date,
                time_block: block,
                customer_location: *customer,
                created_at: now_millis(),
            })
            .await?;

        tracing::info!(
            target: "delivery",
            booking_no = booking.booking_no,
            customer_id = %booking.customer_id,
            date = %time::format_date(date),
            block = ?block,
            orders_in_slot = slot.current_order_count,
            "Delivery slot booked"
        );

        Ok(BookingConfirmation::new(&booking, &slot))
    }

    /// Booking history for the account screen, newest first
    pub async fn bookings_for_customer(
        &self,
        customer_id: &str,
    ) -> AppResult<Vec<DeliveryBooking>> {
        Ok(self.booking_repo.find_by_customer(customer_id).await?)
    }
}
