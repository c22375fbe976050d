//! Delivery Slot Repository
//!
//! 读路径只做查询；预订路径用单条条件语句保证原子性：
//! - 首次预订 CREATE 依赖 (date, time_block) 唯一索引解决抢锚竞态
//! - 后续预订用 `WHERE current_order_count < $capacity` 的条件 UPDATE
//!   实现 compare-and-increment，容量竞态输家得到可重试的 Conflict

use chrono::NaiveDate;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::SLOT_UNIQUE_INDEX;
use crate::db::models::{DeliverySlot, GeoPoint, SlotStatus, TimeBlock};
use crate::delivery::SLOT_CAPACITY;
use crate::utils::time::now_millis;

const TABLE: &str = "delivery_slot";

#[derive(Clone)]
pub struct DeliverySlotRepository {
    base: BaseRepository,
}

impl DeliverySlotRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the slot record for one (date, time_block) pair
    pub async fn find_by_date_block(
        &self,
        date: NaiveDate,
        block: TimeBlock,
    ) -> RepoResult<Option<DeliverySlot>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM delivery_slot WHERE date = $date AND time_block = $block LIMIT 1")
            .bind(("date", date))
            .bind(("block", block))
            .await?;
        let slots: Vec<DeliverySlot> = result.take(0)?;
        Ok(slots.into_iter().next())
    }

    /// Batch-fetch all slot records for the given horizon dates
    pub async fn find_for_dates(&self, dates: &[NaiveDate]) -> RepoResult<Vec<DeliverySlot>> {
        let dates: Vec<NaiveDate> = dates.to_vec();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM delivery_slot WHERE date INSIDE $dates")
            .bind(("dates", dates))
            .await?;
        let slots: Vec<DeliverySlot> = result.take(0)?;
        Ok(slots)
    }

    /// First booking in a window: create the record and pin the anchor.
    ///
    /// The anchor is written exactly once, here. A concurrent first booking
    /// loses on the unique index and gets a retryable conflict.
    pub async fn create_anchored(
        &self,
        date: NaiveDate,
        block: TimeBlock,
        anchor: GeoPoint,
    ) -> RepoResult<DeliverySlot> {
        let now = now_millis();
        let slot = DeliverySlot {
            id: None,
            date,
            time_block: block,
            status: SlotStatus::Anchored,
            anchor: Some(anchor),
            current_order_count: 1,
            created_at: now,
            updated_at: now,
        };

        let created: Result<Option<DeliverySlot>, surrealdb::Error> =
            self.base.db().create(TABLE).content(slot).await;

        match created {
            Ok(Some(slot)) => Ok(slot),
            Ok(None) => Err(RepoError::Database(
                "Failed to create delivery slot".to_string(),
            )),
            Err(e) if e.to_string().contains(SLOT_UNIQUE_INDEX) => Err(RepoError::Conflict(
                "Slot was just opened by another booking".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Compare-and-increment the order count of an existing slot.
    ///
    /// Returns `None` when the slot filled between the caller's read and
    /// this statement (the condition matched no record) — a retryable
    /// conflict, never a lost update. Flips the status to `Full` when the
    /// increment reaches capacity.
    pub async fn try_increment(&self, slot_id: &RecordId) -> RepoResult<Option<DeliverySlot>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $slot SET \
                     status = IF current_order_count + 1 >= $capacity { 'Full' } ELSE { status }, \
                     current_order_count += 1, \
                     updated_at = $now \
                 WHERE current_order_count < $capacity",
            )
            .bind(("slot", slot_id.clone()))
            .bind(("capacity", SLOT_CAPACITY))
            .bind(("now", now_millis()))
            .await?;
        let updated: Vec<DeliverySlot> = result.take(0)?;
        Ok(updated.into_iter().next())
    }
}
