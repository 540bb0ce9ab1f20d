//! System settings repository.

use domain::models::DEFAULT_SETTING_TYPE;

use crate::db::Database;
use crate::entities::SystemSettingEntity;
use crate::error::PersistenceError;
use crate::statement::Statement;

/// Repository for system settings, keyed by `setting_key`.
#[derive(Clone)]
pub struct SettingRepository {
    db: Database,
}

impl SettingRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All settings, ordered by key.
    pub async fn get_settings(&self) -> Result<Vec<SystemSettingEntity>, PersistenceError> {
        self.db.execute_query_as(&get_settings_statement()).await
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<SystemSettingEntity>, PersistenceError> {
        self.db.fetch_optional_as(&get_setting_statement(key)).await
    }

    /// Insert or overwrite a setting.
    ///
    /// Writing the same key twice leaves a single row holding the last
    /// value. The type defaults to `"string"` and the stored description is
    /// left untouched on overwrite.
    pub async fn update_setting(
        &self,
        key: &str,
        value: &str,
        setting_type: Option<&str>,
    ) -> Result<SystemSettingEntity, PersistenceError> {
        self.db
            .fetch_one_as(&update_setting_statement(key, value, setting_type))
            .await
    }
}

fn get_settings_statement() -> Statement {
    Statement::new(
        "get_settings",
        r#"
        SELECT setting_key, setting_value, setting_type, description, updated_at
        FROM system_settings
        ORDER BY setting_key ASC
        "#,
    )
}

fn get_setting_statement(key: &str) -> Statement {
    Statement::new(
        "get_setting",
        r#"
        SELECT setting_key, setting_value, setting_type, description, updated_at
        FROM system_settings
        WHERE setting_key = $1
        "#,
    )
    .bind(key)
}

fn update_setting_statement(key: &str, value: &str, setting_type: Option<&str>) -> Statement {
    Statement::new(
        "update_setting",
        r#"
        INSERT INTO system_settings (setting_key, setting_value, setting_type, updated_at)
        VALUES ($1, $2, $3, CURRENT_TIMESTAMP)
        ON CONFLICT (setting_key) DO UPDATE
        SET setting_value = EXCLUDED.setting_value,
            setting_type = EXCLUDED.setting_type,
            updated_at = CURRENT_TIMESTAMP
        RETURNING setting_key, setting_value, setting_type, description, updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(setting_type.unwrap_or(DEFAULT_SETTING_TYPE))
}
