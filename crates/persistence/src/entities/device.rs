//! Device entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the devices table left-joined with its device type.
#[derive(Debug, Clone, FromRow)]
pub struct DeviceEntity {
    pub id: i64,
    pub name: String,
    pub hostname: Option<String>,
    pub ip_address: String,
    pub device_type_id: Option<i64>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub device_type_name: Option<String>,
    pub device_type_icon: Option<String>,
}

/// Row of the device_types table.
#[derive(Debug, Clone, FromRow)]
pub struct DeviceTypeEntity {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DeviceEntity> for domain::models::Device {
    fn from(entity: DeviceEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            hostname: entity.hostname,
            ip_address: entity.ip_address,
            device_type_id: entity.device_type_id,
            location: entity.location,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            device_type_name: entity.device_type_name,
            device_type_icon: entity.device_type_icon,
        }
    }
}

impl From<DeviceTypeEntity> for domain::models::DeviceType {
    fn from(entity: DeviceTypeEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            icon: entity.icon,
            description: entity.description,
            created_at: entity.created_at,
        }
    }
}
