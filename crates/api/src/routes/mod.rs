//! HTTP route handlers.

pub mod api_keys;
pub mod devices;
pub mod health;
pub mod settings;
pub mod users;
