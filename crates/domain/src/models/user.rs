//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Role assigned to a user created without an explicit role.
pub const DEFAULT_USER_ROLE: &str = "user";

/// A dashboard user. The password hash never leaves the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Identity fields returned after inserting a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Identity fields returned after updating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 32, message = "Role must be 1-32 characters"))]
    pub role: Option<String>,
}

/// Request payload for a partial user update.
///
/// Only the fields present are changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 32, message = "Role must be 1-32 characters"))]
    pub role: Option<String>,

    pub is_active: Option<bool>,
}

/// Response for user listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
}
