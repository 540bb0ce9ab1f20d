//! System settings endpoint handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::setting::{ListSettingsResponse, UpdateSettingRequest};
use domain::models::SystemSetting;
use persistence::repositories::SettingRepository;
use shared::validation::validate_setting_key;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/settings
pub async fn list_settings(
    State(state): State<AppState>,
) -> Result<Json<ListSettingsResponse>, ApiError> {
    let repo = SettingRepository::new(state.db.clone());
    let settings = repo
        .get_settings()
        .await?
        .into_iter()
        .map(SystemSetting::from)
        .collect();

    Ok(Json(ListSettingsResponse { settings }))
}

/// GET /api/v1/settings/:key
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SystemSetting>, ApiError> {
    let repo = SettingRepository::new(state.db.clone());
    let setting = repo
        .get_setting(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Setting '{}' not found", key)))?;

    Ok(Json(setting.into()))
}

/// PUT /api/v1/settings/:key
///
/// Creates the setting or overwrites its value and type.
pub async fn update_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<UpdateSettingRequest>,
) -> Result<Json<SystemSetting>, ApiError> {
    validate_setting_key(&key).map_err(|e| {
        ApiError::Validation(e.message.map(|m| m.to_string()).unwrap_or_default())
    })?;
    request.validate()?;

    let repo = SettingRepository::new(state.db.clone());
    let setting = repo
        .update_setting(&key, &request.value, request.setting_type.as_deref())
        .await?;

    info!(setting_key = %setting.setting_key, setting_type = %setting.setting_type, "Setting updated");

    Ok(Json(setting.into()))
}
