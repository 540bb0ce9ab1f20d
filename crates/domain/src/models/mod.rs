//! Domain models for the MIB platform.

pub mod api_key;
pub mod device;
pub mod setting;
pub mod user;

pub use api_key::{ApiKey, DEFAULT_RATE_LIMIT};
pub use device::{Device, DeviceType};
pub use setting::{SystemSetting, DEFAULT_SETTING_TYPE};
pub use user::{CreatedUser, UpdatedUser, User, DEFAULT_USER_ROLE};
