//! Delivery Booking Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::DeliveryBooking;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "delivery_booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a booking receipt
    pub async fn create(&self, booking: DeliveryBooking) -> RepoResult<DeliveryBooking> {
        let created: Option<DeliveryBooking> =
            self.base.db().create(TABLE).content(booking).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create booking".to_string()))
    }

    /// All bookings for a customer, newest first
    pub async fn find_by_customer(&self, customer_id: &str) -> RepoResult<Vec<DeliveryBooking>> {
        let customer_id = customer_id.to_string();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM delivery_booking WHERE customer_id = $customer_id \
                 ORDER BY created_at DESC",
            )
            .bind(("customer_id", customer_id))
            .await?;
        let bookings: Vec<DeliveryBooking> = result.take(0)?;
        Ok(bookings)
    }
}
