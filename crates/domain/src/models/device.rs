//! Device and device type domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::PageInfo;
use shared::validation::validate_hostname;
use validator::Validate;

/// A managed network device.
///
/// `device_type_name` and `device_type_icon` come from the joined device
/// type and are absent when the device has no type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
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

/// A category of devices (switch, router, UPS, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a device.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDeviceRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_hostname"))]
    pub hostname: Option<String>,

    #[validate(ip(message = "IP address must be a valid IPv4 or IPv6 address"))]
    pub ip_address: String,

    pub device_type_id: Option<i64>,

    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Request payload for a partial device update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDeviceRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_hostname"))]
    pub hostname: Option<String>,

    #[validate(ip(message = "IP address must be a valid IPv4 or IPv6 address"))]
    pub ip_address: Option<String>,

    pub device_type_id: Option<i64>,

    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Query parameters for device listing.
///
/// With none of the fields set, the full list is returned unpaginated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDevicesQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListDevicesQuery {
    pub fn is_filtered(&self) -> bool {
        self.search.is_some() || self.page.is_some() || self.limit.is_some()
    }
}

/// Response for device listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListDevicesResponse {
    pub devices: Vec<Device>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

/// Request payload for creating a device type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDeviceTypeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 64, message = "Icon must be at most 64 characters"))]
    pub icon: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}
