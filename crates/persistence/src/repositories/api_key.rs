//! API key repository for database operations.

use domain::models::DEFAULT_RATE_LIMIT;
use serde::Serialize;
use serde_json::Value;

use crate::db::Database;
use crate::entities::ApiKeyEntity;
use crate::error::PersistenceError;
use crate::metrics::record_query_error;
use crate::statement::Statement;

/// Input for inserting an API key.
///
/// `permissions` is serialized to JSON and stored in a JSONB column.
#[derive(Debug, Clone)]
pub struct NewApiKey<P = Value> {
    pub user_id: i64,
    pub key_name: String,
    pub api_key: String,
    pub permissions: P,
    /// Defaults to 1000 requests per hour when absent.
    pub rate_limit: Option<i32>,
}

/// Repository for API key database operations.
#[derive(Clone)]
pub struct ApiKeyRepository {
    db: Database,
}

impl ApiKeyRepository {
    /// Creates a new ApiKeyRepository over the given client.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Lists API keys, newest first.
    ///
    /// With a `user_id` only that user's keys are returned. Without one,
    /// every key is returned along with its owner's name.
    pub async fn get_api_keys(&self, user_id: Option<i64>) -> Result<Vec<ApiKeyEntity>, PersistenceError> {
        self.db.execute_query_as(&get_api_keys_statement(user_id)).await
    }

    /// Insert an API key and return the stored row.
    pub async fn create_api_key<P: Serialize>(
        &self,
        key: &NewApiKey<P>,
    ) -> Result<ApiKeyEntity, PersistenceError> {
        let statement = create_api_key_statement(key)?;
        self.db.fetch_one_as(&statement).await
    }
}

fn get_api_keys_statement(user_id: Option<i64>) -> Statement {
    match user_id {
        Some(user_id) => Statement::new(
            "get_api_keys_for_user",
            r#"
            SELECT id, user_id, key_name, api_key, permissions, rate_limit, created_at
            FROM api_keys
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id),
        None => Statement::new(
            "get_api_keys",
            r#"
            SELECT ak.id, ak.user_id, ak.key_name, ak.api_key, ak.permissions,
                   ak.rate_limit, ak.created_at, u.name AS user_name
            FROM api_keys ak
            LEFT JOIN users u ON ak.user_id = u.id
            ORDER BY ak.created_at DESC, ak.id DESC
            "#,
        ),
    }
}

fn create_api_key_statement<P: Serialize>(key: &NewApiKey<P>) -> Result<Statement, PersistenceError> {
    let permissions = serde_json::to_value(&key.permissions).map_err(|e| {
        tracing::error!(query = "create_api_key", error = %e, "Failed to serialize API key permissions");
        record_query_error("create_api_key");
        PersistenceError::Serialization(e)
    })?;

    Ok(Statement::new(
        "create_api_key",
        r#"
        INSERT INTO api_keys (user_id, key_name, api_key, permissions, rate_limit)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, key_name, api_key, permissions, rate_limit, created_at
        "#,
    )
    .bind(key.user_id)
    .bind(key.key_name.as_str())
    .bind(key.api_key.as_str())
    .bind(permissions)
    .bind(key.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT)))
}
