//! User entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the users table without the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
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

/// Identity fields returned by `INSERT INTO users ... RETURNING`.
#[derive(Debug, Clone, FromRow)]
pub struct CreatedUserEntity {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Identity fields returned by `UPDATE users ... RETURNING`.
#[derive(Debug, Clone, FromRow)]
pub struct UpdatedUserEntity {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            role: entity.role,
            avatar_url: entity.avatar_url,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            last_login: entity.last_login,
        }
    }
}

impl From<CreatedUserEntity> for domain::models::CreatedUser {
    fn from(entity: CreatedUserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            role: entity.role,
            created_at: entity.created_at,
        }
    }
}

impl From<UpdatedUserEntity> for domain::models::UpdatedUser {
    fn from(entity: UpdatedUserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            role: entity.role,
            updated_at: entity.updated_at,
        }
    }
}
