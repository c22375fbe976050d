//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) connection and schema definitions.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "leafline";
const DATABASE: &str = "storefront";

/// Index backing the (date, time_block) uniqueness invariant. The
/// reservation path relies on it to resolve the anchor-setting race.
pub const SLOT_UNIQUE_INDEX: &str = "uniq_delivery_slot_date_block";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database and apply schema definitions
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!("Database connection established (SurrealDB embedded, RocksDB)");

        Ok(Self { db })
    }

    /// Idempotent schema setup, run on every boot
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        let statements = format!(
            "DEFINE TABLE IF NOT EXISTS store_settings SCHEMALESS;\
             DEFINE TABLE IF NOT EXISTS delivery_slot SCHEMALESS;\
             DEFINE TABLE IF NOT EXISTS delivery_booking SCHEMALESS;\
             DEFINE INDEX IF NOT EXISTS {SLOT_UNIQUE_INDEX} \
                 ON TABLE delivery_slot COLUMNS date, time_block UNIQUE;\
             DEFINE INDEX IF NOT EXISTS idx_delivery_booking_customer \
                 ON TABLE delivery_booking COLUMNS customer_id;"
        );

        db.query(statements)
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }
}
