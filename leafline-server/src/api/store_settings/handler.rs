//! Store Settings API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{StoreSettings, StoreSettingsUpdate};
use crate::db::repository::StoreSettingsRepository;
use crate::utils::AppResult;
use crate::utils::validation::validate_cutoff_hour;

/// Wire form of the settings singleton
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettingsView {
    pub same_day_delivery_enabled: bool,
    pub delivery_cutoff_hour: u8,
    pub updated_at: i64,
}

impl From<StoreSettings> for StoreSettingsView {
    fn from(settings: StoreSettings) -> Self {
        Self {
            same_day_delivery_enabled: settings.same_day_delivery_enabled,
            delivery_cutoff_hour: settings.delivery_cutoff_hour,
            updated_at: settings.updated_at,
        }
    }
}

/// GET /api/store-settings - 获取配送配置 (不存在时按默认值惰性创建)
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<StoreSettingsView>> {
    let repo = StoreSettingsRepository::new(state.db.clone());
    let settings = repo.get_or_create().await?;
    Ok(Json(settings.into()))
}

/// PUT /api/store-settings - 更新配送配置
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<StoreSettingsUpdate>,
) -> AppResult<Json<StoreSettingsView>> {
    if let Some(hour) = payload.delivery_cutoff_hour {
        validate_cutoff_hour(hour)?;
    }

    let repo = StoreSettingsRepository::new(state.db.clone());
    let settings = repo.update(payload).await?;

    tracing::info!(
        target: "store_settings",
        operator_id = %current_user.id,
        same_day = settings.same_day_delivery_enabled,
        cutoff = settings.delivery_cutoff_hour,
        "Delivery settings updated"
    );

    Ok(Json(settings.into()))
}
