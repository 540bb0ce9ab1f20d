//! API key entity (database row mapping).

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// Row of the api_keys table.
///
/// `user_name` is only selected by the all-users listing, which joins the
/// owner; other statements leave it `None`.
#[derive(Debug, Clone, FromRow)]
pub struct ApiKeyEntity {
    pub id: i64,
    pub user_id: i64,
    pub key_name: String,
    pub api_key: String,
    pub permissions: Json<Value>,
    pub rate_limit: i32,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub user_name: Option<String>,
}

impl From<ApiKeyEntity> for domain::models::ApiKey {
    fn from(entity: ApiKeyEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            key_name: entity.key_name,
            api_key: entity.api_key,
            permissions: entity.permissions.0,
            rate_limit: entity.rate_limit,
            created_at: entity.created_at,
            user_name: entity.user_name,
        }
    }
}
