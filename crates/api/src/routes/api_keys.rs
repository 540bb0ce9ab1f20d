//! API key endpoint handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::api_key::{
    ApiKeySummary, CreateApiKeyRequest, CreateApiKeyResponse, ListApiKeysQuery, ListApiKeysResponse,
};
use domain::models::ApiKey;
use persistence::repositories::{ApiKeyRepository, NewApiKey};
use shared::crypto::generate_api_key;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/api-keys?user_id=
///
/// Keys are listed with a masked preview, never the full value.
pub async fn list_api_keys(
    State(state): State<AppState>,
    Query(query): Query<ListApiKeysQuery>,
) -> Result<Json<ListApiKeysResponse>, ApiError> {
    let repo = ApiKeyRepository::new(state.db.clone());
    let api_keys = repo
        .get_api_keys(query.user_id)
        .await?
        .into_iter()
        .map(|entity| ApiKeySummary::from(ApiKey::from(entity)))
        .collect();

    Ok(Json(ListApiKeysResponse { api_keys }))
}

/// POST /api/v1/api-keys
///
/// Generates a key unless the request supplies one. The full key is
/// returned only in this response.
pub async fn create_api_key(
    State(state): State<AppState>,
    Json(request): Json<CreateApiKeyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = ApiKeyRepository::new(state.db.clone());
    let entity = repo
        .create_api_key(&NewApiKey {
            user_id: request.user_id,
            key_name: request.key_name,
            api_key: request.api_key.unwrap_or_else(generate_api_key),
            permissions: request.permissions,
            rate_limit: request.rate_limit,
        })
        .await?;

    info!(
        api_key_id = entity.id,
        user_id = entity.user_id,
        rate_limit = entity.rate_limit,
        "API key created"
    );

    let response = CreateApiKeyResponse::from(ApiKey::from(entity));
    Ok((StatusCode::CREATED, Json(response)))
}
