//! Delivery Slot Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Customer / anchor coordinate pair (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Fixed daily delivery windows (门店本地时间的三个固定 4 小时时段)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBlock {
    Morning,
    Afternoon,
    Evening,
}

impl TimeBlock {
    /// All blocks in display order
    pub const ALL: [TimeBlock; 3] = [TimeBlock::Morning, TimeBlock::Afternoon, TimeBlock::Evening];

    /// Local hour the window opens
    pub fn start_hour(&self) -> u32 {
        match self {
            TimeBlock::Morning => 8,
            TimeBlock::Afternoon => 12,
            TimeBlock::Evening => 16,
        }
    }

    /// Local hour the window closes (exclusive; a slot is gone once the
    /// current hour reaches this value)
    pub fn end_hour(&self) -> u32 {
        match self {
            TimeBlock::Morning => 12,
            TimeBlock::Afternoon => 16,
            TimeBlock::Evening => 20,
        }
    }

    /// Human label shown in the storefront slot picker
    pub fn label(&self) -> &'static str {
        match self {
            TimeBlock::Morning => "Morning (8am - 12pm)",
            TimeBlock::Afternoon => "Afternoon (12pm - 4pm)",
            TimeBlock::Evening => "Evening (4pm - 8pm)",
        }
    }
}

/// Lifecycle state of a persisted slot record
///
/// `Open`: no bookings yet, no geographic constraint.
/// `Anchored`: first booking pinned a reference coordinate; later bookings
/// are distance-checked against it.
/// `Full`: driver capacity reached; closed regardless of geography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Open,
    Anchored,
    Full,
}

/// Delivery slot entity — one record per unique (date, time_block) pair.
///
/// Created on the first successful booking for that window; the record is
/// historical and never deleted. `anchor` is set exactly once, by the first
/// booking, and is immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliverySlot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Calendar date (YYYY-MM-DD, not a timestamp — avoids timezone drift)
    pub date: NaiveDate,
    pub time_block: TimeBlock,
    pub status: SlotStatus,
    /// First customer's coordinates, pinned at first booking
    pub anchor: Option<GeoPoint>,
    /// 0 ..= SLOT_CAPACITY
    pub current_order_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_hours() {
        assert_eq!(TimeBlock::Morning.start_hour(), 8);
        assert_eq!(TimeBlock::Morning.end_hour(), 12);
        assert_eq!(TimeBlock::Afternoon.end_hour(), 16);
        assert_eq!(TimeBlock::Evening.end_hour(), 20);
    }

    #[test]
    fn test_block_serde_names() {
        // Persisted and wire form is the bare variant name
        assert_eq!(
            serde_json::to_string(&TimeBlock::Morning).unwrap(),
            "\"Morning\""
        );
        assert_eq!(
            serde_json::from_str::<TimeBlock>("\"Evening\"").unwrap(),
            TimeBlock::Evening
        );
        assert_eq!(
            serde_json::to_string(&SlotStatus::Anchored).unwrap(),
            "\"Anchored\""
        );
    }
}
