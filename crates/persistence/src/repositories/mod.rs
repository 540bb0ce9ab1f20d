//! Repository implementations for database operations.

pub mod api_key;
pub mod device;
pub mod setting;
pub mod user;

pub use api_key::{ApiKeyRepository, NewApiKey};
pub use device::{DeviceRepository, DeviceSearch, DeviceUpdate, NewDevice, NewDeviceType};
pub use setting::SettingRepository;
pub use user::{NewUser, UserRepository, UserUpdate};
