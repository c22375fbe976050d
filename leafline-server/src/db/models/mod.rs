//! Data Models
//!
//! Persisted entities for the delivery subsystem. Enum fields are closed
//! enumerations (never string matching), serialized under their bare
//! variant names.

pub mod booking;
pub mod delivery_slot;
pub mod store_settings;

pub use booking::DeliveryBooking;
pub use delivery_slot::{DeliverySlot, GeoPoint, SlotStatus, TimeBlock};
pub use store_settings::{StoreSettings, StoreSettingsUpdate};
