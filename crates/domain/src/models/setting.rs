//! System setting domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Type recorded for a setting written without an explicit type.
pub const DEFAULT_SETTING_TYPE: &str = "string";

/// Setting types the dashboard knows how to render.
pub const SETTING_TYPES: &[&str] = &["string", "integer", "float", "boolean", "json"];

/// A key/value system setting. The key is the natural identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSetting {
    pub setting_key: String,
    pub setting_value: String,
    pub setting_type: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for upserting a setting; the key comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSettingRequest {
    #[validate(length(max = 10000, message = "Value must be at most 10000 characters"))]
    pub value: String,

    #[validate(custom(function = "validate_setting_type"))]
    pub setting_type: Option<String>,
}

/// Response for settings listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListSettingsResponse {
    pub settings: Vec<SystemSetting>,
}

fn validate_setting_type(setting_type: &str) -> Result<(), ValidationError> {
    if SETTING_TYPES.contains(&setting_type) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_setting_type");
        err.message = Some(format!("Setting type must be one of: {}", SETTING_TYPES.join(", ")).into());
        Err(err)
    }
}
