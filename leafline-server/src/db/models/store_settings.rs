//! Store Settings Model (Singleton)

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Store-wide delivery configuration (单例：`store_settings:main`)
///
/// Created lazily with defaults on first read; mutated only by the admin
/// settings endpoint; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Whether "today" may appear in the bookable horizon
    pub same_day_delivery_enabled: bool,
    /// Local hour after which same-day ordering closes (0..=23)
    pub delivery_cutoff_hour: u8,
    pub created_at: i64,
    pub updated_at: i64,
}

impl StoreSettings {
    /// Documented defaults for the lazily created singleton
    pub fn with_defaults(now: i64) -> Self {
        Self {
            id: None,
            same_day_delivery_enabled: false,
            delivery_cutoff_hour: 20,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update payload (admin configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub same_day_delivery_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_cutoff_hour: Option<u8>,
}
