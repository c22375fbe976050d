//! End-to-end delivery flow against a real embedded database.
//! Run: cargo test -p leafline-server --test delivery_flow

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use leafline_server::db::DbService;
use leafline_server::db::models::{GeoPoint, SlotStatus, StoreSettingsUpdate, TimeBlock};
use leafline_server::db::repository::{DeliverySlotRepository, StoreSettingsRepository};
use leafline_server::delivery::{
    AvailabilityStatus, BookingService, DeliveryScheduleEngine, SLOT_CAPACITY,
};
use leafline_server::utils::AppError;

async fn setup_db(tmp: &tempfile::TempDir) -> Surreal<Db> {
    let db_path = tmp.path().join("leafline.db");
    let service = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("db init");
    service.db
}

/// Monday 2024-06-03 at the given hour, store-local
fn monday_at(hour: u32) -> DateTime<Tz> {
    New_York.with_ymd_and_hms(2024, 6, 3, hour, 0, 0).unwrap()
}

fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()
}

fn downtown() -> GeoPoint {
    GeoPoint {
        lat: 44.0,
        lng: -76.0,
    }
}

/// ~2 miles north of downtown — inside the 8-mile anchor radius
fn nearby() -> GeoPoint {
    GeoPoint {
        lat: 44.029,
        lng: -76.0,
    }
}

/// ~20 miles north of downtown — well outside the anchor radius
fn far_away() -> GeoPoint {
    GeoPoint {
        lat: 44.29,
        lng: -76.0,
    }
}

#[tokio::test]
async fn settings_singleton_lazily_created_with_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let db = setup_db(&tmp).await;
    let repo = StoreSettingsRepository::new(db.clone());

    assert!(repo.get().await.unwrap().is_none());

    let settings = repo.get_or_create().await.unwrap();
    assert!(!settings.same_day_delivery_enabled);
    assert_eq!(settings.delivery_cutoff_hour, 20);

    // Idempotent: second call reads the same record
    let again = repo.get_or_create().await.unwrap();
    assert_eq!(again.id, settings.id);
}

#[tokio::test]
async fn settings_update_is_partial() {
    let tmp = tempfile::tempdir().unwrap();
    let db = setup_db(&tmp).await;
    let repo = StoreSettingsRepository::new(db.clone());

    let updated = repo
        .update(StoreSettingsUpdate {
            same_day_delivery_enabled: Some(true),
            delivery_cutoff_hour: None,
        })
        .await
        .unwrap();
    assert!(updated.same_day_delivery_enabled);
    // Untouched field keeps its default
    assert_eq!(updated.delivery_cutoff_hour, 20);

    let updated = repo
        .update(StoreSettingsUpdate {
            same_day_delivery_enabled: None,
            delivery_cutoff_hour: Some(22),
        })
        .await
        .unwrap();
    assert!(updated.same_day_delivery_enabled);
    assert_eq!(updated.delivery_cutoff_hour, 22);
}

#[tokio::test]
async fn availability_on_empty_database() {
    let tmp = tempfile::tempdir().unwrap();
    let db = setup_db(&tmp).await;
    let engine = DeliveryScheduleEngine::new(db.clone());

    // Default settings: same-day off → two horizon days, everything Open
    let report = engine
        .availability(&downtown(), monday_at(10))
        .await
        .unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].date, "2024-06-04");
    assert_eq!(report[1].date, "2024-06-05");
    for day in &report {
        assert_eq!(day.slots.len(), 3);
        assert!(
            day.slots
                .iter()
                .all(|s| s.status == AvailabilityStatus::Open)
        );
    }
}

#[tokio::test]
async fn availability_with_same_day_enabled() {
    let tmp = tempfile::tempdir().unwrap();
    let db = setup_db(&tmp).await;
    StoreSettingsRepository::new(db.clone())
        .update(StoreSettingsUpdate {
            same_day_delivery_enabled: Some(true),
            delivery_cutoff_hour: None,
        })
        .await
        .unwrap();

    let engine = DeliveryScheduleEngine::new(db.clone());

    // 14:00: Monday appears, its Morning and Afternoon are gone
    let report = engine
        .availability(&downtown(), monday_at(14))
        .await
        .unwrap();
    assert_eq!(report.len(), 3);
    assert_eq!(report[0].date, "2024-06-03");
    assert_eq!(report[0].day_name, "Monday");
    assert_eq!(report[0].slots[0].status, AvailabilityStatus::Unavailable);
    assert_eq!(report[0].slots[1].status, AvailabilityStatus::Open);
    assert_eq!(report[0].slots[2].status, AvailabilityStatus::Open);

    // 21:00 is past the 20:00 cutoff: today drops out again
    let report = engine
        .availability(&downtown(), monday_at(21))
        .await
        .unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].date, "2024-06-04");
}

#[tokio::test]
async fn first_booking_pins_the_anchor() {
    let tmp = tempfile::tempdir().unwrap();
    let db = setup_db(&tmp).await;
    let service = BookingService::new(db.clone());
    let slot_repo = DeliverySlotRepository::new(db.clone());

    let confirmation = service
        .book("cust_1", &downtown(), tuesday(), TimeBlock::Morning, monday_at(10))
        .await
        .unwrap();
    assert_eq!(confirmation.orders_in_slot, 1);
    assert_eq!(confirmation.slot_status, SlotStatus::Anchored);
    assert_eq!(confirmation.date, "2024-06-04");
    assert_eq!(confirmation.day_name, "Tuesday");

    let slot = slot_repo
        .find_by_date_block(tuesday(), TimeBlock::Morning)
        .await
        .unwrap()
        .expect("slot record created");
    assert_eq!(slot.status, SlotStatus::Anchored);
    assert_eq!(slot.current_order_count, 1);
    let anchor = slot.anchor.expect("anchor pinned");
    assert_eq!(anchor.lat, downtown().lat);
    assert_eq!(anchor.lng, downtown().lng);
}

#[tokio::test]
async fn anchored_slot_accepts_neighbors_and_locks_out_strangers() {
    let tmp = tempfile::tempdir().unwrap();
    let db = setup_db(&tmp).await;
    let service = BookingService::new(db.clone());
    let engine = DeliveryScheduleEngine::new(db.clone());

    service
        .book("cust_1", &downtown(), tuesday(), TimeBlock::Evening, monday_at(10))
        .await
        .unwrap();

    // A neighbor two miles away can still book into the same run
    let confirmation = service
        .book("cust_2", &nearby(), tuesday(), TimeBlock::Evening, monday_at(10))
        .await
        .unwrap();
    assert_eq!(confirmation.orders_in_slot, 2);

    // A customer 20 miles out sees the slot Locked with the distance
    let report = engine.availability(&far_away(), monday_at(10)).await.unwrap();
    let evening = &report[0].slots[2];
    assert_eq!(evening.status, AvailabilityStatus::Locked);
    let reason = evening.reason.as_deref().unwrap();
    assert!(reason.starts_with("Zone mismatch ("), "got {reason}");
    assert!(reason.ends_with("miles from route)"), "got {reason}");

    // ... and their booking attempt is rejected with the same rule
    let err = service
        .book("cust_3", &far_away(), tuesday(), TimeBlock::Evening, monday_at(10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(msg) if msg.starts_with("Zone mismatch")));

    // Only nearby blocks are anchored; other blocks stay open to everyone
    let report = engine.availability(&far_away(), monday_at(10)).await.unwrap();
    assert_eq!(report[0].slots[0].status, AvailabilityStatus::Open);
    assert_eq!(report[0].slots[1].status, AvailabilityStatus::Open);
}

#[tokio::test]
async fn slot_fills_at_capacity() {
    let tmp = tempfile::tempdir().unwrap();
    let db = setup_db(&tmp).await;
    let service = BookingService::new(db.clone());
    let engine = DeliveryScheduleEngine::new(db.clone());

    for i in 0..SLOT_CAPACITY {
        let confirmation = service
            .book(
                &format!("cust_{i}"),
                &downtown(),
                tuesday(),
                TimeBlock::Afternoon,
                monday_at(10),
            )
            .await
            .unwrap();
        assert_eq!(confirmation.orders_in_slot, i + 1);
    }

    // Capacity reached: the status flipped on the final increment
    let slot = DeliverySlotRepository::new(db.clone())
        .find_by_date_block(tuesday(), TimeBlock::Afternoon)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(slot.status, SlotStatus::Full);
    assert_eq!(slot.current_order_count, SLOT_CAPACITY);

    // The 13th booking is refused even from inside the zone
    let err = service
        .book("cust_13", &downtown(), tuesday(), TimeBlock::Afternoon, monday_at(10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(msg) if msg == "Driver Fully Booked"));

    // Full beats geography in the report, even for out-of-zone customers
    let report = engine.availability(&far_away(), monday_at(10)).await.unwrap();
    let afternoon = &report[0].slots[1];
    assert_eq!(afternoon.status, AvailabilityStatus::Full);
    assert_eq!(afternoon.reason.as_deref(), Some("Driver Fully Booked"));
}

#[tokio::test]
async fn compare_and_increment_refuses_when_full() {
    let tmp = tempfile::tempdir().unwrap();
    let db = setup_db(&tmp).await;
    let service = BookingService::new(db.clone());
    let slot_repo = DeliverySlotRepository::new(db.clone());

    for i in 0..SLOT_CAPACITY {
        service
            .book(
                &format!("cust_{i}"),
                &downtown(),
                tuesday(),
                TimeBlock::Morning,
                monday_at(10),
            )
            .await
            .unwrap();
    }

    // The conditional update matches no record once the slot is full —
    // this is what a booking that lost the race observes
    let slot = slot_repo
        .find_by_date_block(tuesday(), TimeBlock::Morning)
        .await
        .unwrap()
        .unwrap();
    let raced = slot_repo.try_increment(&slot.id.unwrap()).await.unwrap();
    assert!(raced.is_none());

    // The count never moved past capacity
    let slot = slot_repo
        .find_by_date_block(tuesday(), TimeBlock::Morning)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(slot.current_order_count, SLOT_CAPACITY);
}

#[tokio::test]
async fn booking_gates_on_date_and_time() {
    let tmp = tempfile::tempdir().unwrap();
    let db = setup_db(&tmp).await;
    let service = BookingService::new(db.clone());

    // Same-day booking with same-day delivery disabled
    let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let err = service
        .book("cust_1", &downtown(), today, TimeBlock::Evening, monday_at(10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    // A date beyond the rolling horizon
    let next_week = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let err = service
        .book("cust_1", &downtown(), next_week, TimeBlock::Morning, monday_at(10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    // A window that already passed today (same-day enabled)
    StoreSettingsRepository::new(db.clone())
        .update(StoreSettingsUpdate {
            same_day_delivery_enabled: Some(true),
            delivery_cutoff_hour: None,
        })
        .await
        .unwrap();
    let err = service
        .book("cust_1", &downtown(), today, TimeBlock::Morning, monday_at(14))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(msg) if msg.contains("already passed")));

    // The evening window is still bookable at 14:00
    let confirmation = service
        .book("cust_1", &downtown(), today, TimeBlock::Evening, monday_at(14))
        .await
        .unwrap();
    assert_eq!(confirmation.orders_in_slot, 1);
}

#[tokio::test]
async fn booking_history_is_recorded() {
    let tmp = tempfile::tempdir().unwrap();
    let db = setup_db(&tmp).await;
    let service = BookingService::new(db.clone());

    service
        .book("cust_1", &downtown(), tuesday(), TimeBlock::Morning, monday_at(10))
        .await
        .unwrap();
    service
        .book("cust_1", &nearby(), tuesday(), TimeBlock::Evening, monday_at(10))
        .await
        .unwrap();
    service
        .book("cust_2", &downtown(), tuesday(), TimeBlock::Morning, monday_at(10))
        .await
        .unwrap();

    let mine = service.bookings_for_customer("cust_1").await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|b| b.customer_id == "cust_1"));

    let theirs = service.bookings_for_customer("cust_2").await.unwrap();
    assert_eq!(theirs.len(), 1);
}
