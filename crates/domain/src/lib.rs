//! Domain layer for the MIB platform backend.
//!
//! This crate contains the domain models (users, devices, device types,
//! system settings, API keys) and the request/response types exchanged with
//! the HTTP layer. It performs no I/O.

pub mod models;
