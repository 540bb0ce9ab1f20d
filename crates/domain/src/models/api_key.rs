//! API key domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Requests-per-hour budget for a key created without an explicit limit.
pub const DEFAULT_RATE_LIMIT: i32 = 1000;

/// An API key owned by a user.
///
/// `user_name` is only populated by listings that join the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    pub user_id: i64,
    pub key_name: String,
    pub api_key: String,
    pub permissions: Value,
    pub rate_limit: i32,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
}

/// Request payload for creating an API key.
///
/// When `api_key` is omitted the server generates one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApiKeyRequest {
    #[validate(range(min = 1, message = "user_id must be positive"))]
    pub user_id: i64,

    #[validate(length(min = 1, max = 100, message = "Key name must be 1-100 characters"))]
    pub key_name: String,

    #[validate(length(min = 16, max = 128, message = "API key must be 16-128 characters"))]
    pub api_key: Option<String>,

    #[serde(default = "default_permissions")]
    pub permissions: Value,

    #[validate(range(min = 1, max = 1000000, message = "Rate limit must be 1-1000000"))]
    pub rate_limit: Option<i32>,
}

/// Query parameters for API key listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListApiKeysQuery {
    pub user_id: Option<i64>,
}

/// API key as shown in listings: the secret is masked.
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeySummary {
    pub id: i64,
    pub user_id: i64,
    pub key_name: String,
    pub key_preview: String,
    pub permissions: Value,
    pub rate_limit: i32,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Response for API key listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListApiKeysResponse {
    pub api_keys: Vec<ApiKeySummary>,
}

/// Response when creating a key. The full key is returned only here.
#[derive(Debug, Clone, Serialize)]
pub struct CreateApiKeyResponse {
    pub id: i64,
    pub user_id: i64,
    pub key_name: String,
    pub api_key: String,
    pub permissions: Value,
    pub rate_limit: i32,
    pub created_at: DateTime<Utc>,
}

fn default_permissions() -> Value {
    Value::Array(Vec::new())
}

impl From<ApiKey> for ApiKeySummary {
    fn from(key: ApiKey) -> Self {
        let key_preview = match key.api_key.char_indices().nth(8) {
            Some((idx, _)) => format!("{}...", &key.api_key[..idx]),
            None => "...".to_string(),
        };
        Self {
            id: key.id,
            user_id: key.user_id,
            key_name: key.key_name,
            key_preview,
            permissions: key.permissions,
            rate_limit: key.rate_limit,
            created_at: key.created_at,
            user_name: key.user_name,
        }
    }
}

impl From<ApiKey> for CreateApiKeyResponse {
    fn from(key: ApiKey) -> Self {
        Self {
            id: key.id,
            user_id: key.user_id,
            key_name: key.key_name,
            api_key: key.api_key,
            permissions: key.permissions,
            rate_limit: key.rate_limit,
            created_at: key.created_at,
        }
    }
}
