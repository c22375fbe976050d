//! Store Settings Repository (Singleton)

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{StoreSettings, StoreSettingsUpdate};
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "store_settings";
const SINGLETON_ID: &str = "main";

#[derive(Clone)]
pub struct StoreSettingsRepository {
    base: BaseRepository,
}

impl StoreSettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Get or create the singleton settings record
    ///
    /// Missing configuration is recovered locally with documented defaults
    /// (same-day delivery off, cutoff at 20:00); it is never an error.
    pub async fn get_or_create(&self) -> RepoResult<StoreSettings> {
        if let Some(settings) = self.get().await? {
            return Ok(settings);
        }

        let settings = StoreSettings::with_defaults(now_millis());

        let created: Option<StoreSettings> = self
            .base
            .db()
            .create((TABLE, SINGLETON_ID))
            .content(settings)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create store settings".to_string()))
    }

    /// Get the singleton settings record
    pub async fn get(&self) -> RepoResult<Option<StoreSettings>> {
        let settings: Option<StoreSettings> =
            self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(settings)
    }

    /// Update settings (admin configuration)
    pub async fn update(&self, data: StoreSettingsUpdate) -> RepoResult<StoreSettings> {
        // Ensure singleton exists
        self.get_or_create().await?;

        let singleton_id = RecordId::from_table_key(TABLE, SINGLETON_ID);
        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updated_at = $now")
            .bind(("id", singleton_id.clone()))
            .bind(("now", now_millis()))
            .await?;

        let updated: Option<StoreSettings> =
            self.base.db().update(singleton_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update store settings".to_string()))
    }
}
