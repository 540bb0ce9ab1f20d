//! System setting entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the system_settings table.
#[derive(Debug, Clone, FromRow)]
pub struct SystemSettingEntity {
    pub setting_key: String,
    pub setting_value: String,
    pub setting_type: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<SystemSettingEntity> for domain::models::SystemSetting {
    fn from(entity: SystemSettingEntity) -> Self {
        Self {
            setting_key: entity.setting_key,
            setting_value: entity.setting_value,
            setting_type: entity.setting_type,
            description: entity.description,
            updated_at: entity.updated_at,
        }
    }
}
