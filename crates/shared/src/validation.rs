//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a DNS hostname.
const MAX_HOSTNAME_LENGTH: usize = 253;

/// Maximum length of a single DNS label.
const MAX_LABEL_LENGTH: usize = 63;

/// Width of the `system_settings.setting_key` column.
pub const MAX_SETTING_KEY_LENGTH: usize = 100;

/// Validates an RFC 1123 hostname (letters, digits, hyphens, dot-separated labels).
pub fn validate_hostname(hostname: &str) -> Result<(), ValidationError> {
    let valid = !hostname.is_empty()
        && hostname.len() <= MAX_HOSTNAME_LENGTH
        && hostname.trim_end_matches('.').split('.').all(|label| {
            !label.is_empty()
                && label.len() <= MAX_LABEL_LENGTH
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_hostname");
        err.message = Some("Hostname must be a valid DNS name".into());
        Err(err)
    }
}

/// Validates a system setting key: lowercase letters, digits, `_` and `.`,
/// at most [`MAX_SETTING_KEY_LENGTH`] characters.
pub fn validate_setting_key(key: &str) -> Result<(), ValidationError> {
    if key.len() > MAX_SETTING_KEY_LENGTH {
        let mut err = ValidationError::new("setting_key_too_long");
        err.message = Some(format!("Setting key must be at most {MAX_SETTING_KEY_LENGTH} characters").into());
        return Err(err);
    }

    let valid = !key.is_empty()
        && key.chars().next().is_some_and(|c| c.is_ascii_lowercase())
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.');

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_setting_key");
        err.message = Some(
            "Setting key must start with a lowercase letter and contain only lowercase letters, digits, '_' or '.'"
                .into(),
        );
        Err(err)
    }
}
