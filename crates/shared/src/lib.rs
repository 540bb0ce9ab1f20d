//! Shared utilities for the MIB platform backend.
//!
//! This crate provides functionality used across the other crates:
//! - API key generation
//! - Password hashing with Argon2id
//! - Offset pagination
//! - Validation helpers for hostnames and setting keys

pub mod crypto;
pub mod pagination;
pub mod password;
pub mod validation;
