//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod api_key;
pub mod device;
pub mod setting;
pub mod user;

pub use api_key::ApiKeyEntity;
pub use device::{DeviceEntity, DeviceTypeEntity};
pub use setting::SystemSettingEntity;
pub use user::{CreatedUserEntity, UpdatedUserEntity, UserEntity};
