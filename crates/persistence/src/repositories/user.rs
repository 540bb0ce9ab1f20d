//! User repository for database operations.

use domain::models::DEFAULT_USER_ROLE;

use crate::db::Database;
use crate::entities::{CreatedUserEntity, UpdatedUserEntity, UserEntity};
use crate::error::PersistenceError;
use crate::statement::Statement;

/// Input for inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    /// Defaults to `"user"` when absent.
    pub role: Option<String>,
}

/// Partial update of a user. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.role.is_none() && self.is_active.is_none()
    }
}

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    /// Creates a new UserRepository over the given client.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All users, newest first.
    pub async fn get_users(&self) -> Result<Vec<UserEntity>, PersistenceError> {
        self.db.execute_query_as(&get_users_statement()).await
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, PersistenceError> {
        self.db.fetch_optional_as(&find_user_by_id_statement(id)).await
    }

    /// Insert a user and return its identity fields.
    pub async fn create_user(&self, user: &NewUser) -> Result<CreatedUserEntity, PersistenceError> {
        self.db.fetch_one_as(&create_user_statement(user)).await
    }

    /// Apply a partial update.
    ///
    /// Returns `Ok(None)` when no user has the given ID. An empty update is
    /// rejected without touching the database.
    pub async fn update_user(
        &self,
        id: i64,
        update: &UserUpdate,
    ) -> Result<Option<UpdatedUserEntity>, PersistenceError> {
        let statement = update_user_statement(id, update)?;
        self.db.fetch_optional_as(&statement).await
    }
}

const USER_COLUMNS: &str =
    "id, email, name, role, avatar_url, is_active, created_at, updated_at, last_login";

fn get_users_statement() -> Statement {
    Statement::new(
        "get_users",
        format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY created_at DESC, id DESC
            "#
        ),
    )
}

fn find_user_by_id_statement(id: i64) -> Statement {
    Statement::new(
        "find_user_by_id",
        format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "#
        ),
    )
    .bind(id)
}

fn create_user_statement(user: &NewUser) -> Statement {
    Statement::new(
        "create_user",
        r#"
        INSERT INTO users (email, name, password_hash, role)
        VALUES ($1, $2, $3, $4)
        RETURNING id, email, name, role, created_at
        "#,
    )
    .bind(user.email.as_str())
    .bind(user.name.as_str())
    .bind(user.password_hash.as_str())
    .bind(user.role.as_deref().unwrap_or(DEFAULT_USER_ROLE))
}

fn update_user_statement(id: i64, update: &UserUpdate) -> Result<Statement, PersistenceError> {
    if update.is_empty() {
        return Err(PersistenceError::EmptyUpdate);
    }

    Ok(Statement::new(
        "update_user",
        r#"
        UPDATE users
        SET email = COALESCE($2, email),
            name = COALESCE($3, name),
            role = COALESCE($4, role),
            is_active = COALESCE($5, is_active),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $1
        RETURNING id, email, name, role, updated_at
        "#,
    )
    .bind(id)
    .bind(update.email.as_deref())
    .bind(update.name.as_deref())
    .bind(update.role.as_deref())
    .bind(update.is_active))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::SqlParam;

    fn new_user(role: Option<&str>) -> NewUser {
        NewUser {
            email: "noc@example.com".to_string(),
            name: "NOC".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_get_users_orders_newest_first_without_password() {
        let stmt = get_users_statement();
        assert!(stmt.sql().contains("ORDER BY created_at DESC"));
        assert!(!stmt.sql().contains("password_hash"));
        assert!(stmt.params().is_empty());
    }

    #[test]
    fn test_create_user_defaults_role() {
        let stmt = create_user_statement(&new_user(None));
        assert_eq!(stmt.params()[3], SqlParam::Text(Some("user".to_string())));
        assert_eq!(stmt.max_placeholder(), stmt.params().len());
    }

    #[test]
    fn test_create_user_keeps_explicit_role() {
        let stmt = create_user_statement(&new_user(Some("admin")));
        assert_eq!(stmt.params()[3], SqlParam::Text(Some("admin".to_string())));
    }

    #[test]
    fn test_create_user_binds_hostile_email() {
        let mut user = new_user(None);
        user.email = "a'); DELETE FROM users; --@example.com".to_string();
        let stmt = create_user_statement(&user);
        assert!(!stmt.sql().contains("DELETE"));
        assert_eq!(stmt.params()[0], SqlParam::Text(Some(user.email.clone())));
    }

    #[test]
    fn test_update_user_rejects_empty_update() {
        let result = update_user_statement(1, &UserUpdate::default());
        assert!(matches!(result, Err(PersistenceError::EmptyUpdate)));
    }

    #[test]
    fn test_update_user_binds_absent_fields_as_null() {
        let update = UserUpdate {
            is_active: Some(false),
            ..Default::default()
        };
        let stmt = update_user_statement(42, &update).unwrap();

        assert_eq!(
            stmt.params(),
            &[
                SqlParam::BigInt(Some(42)),
                SqlParam::Text(None),
                SqlParam::Text(None),
                SqlParam::Text(None),
                SqlParam::Bool(Some(false)),
            ]
        );
        assert!(stmt.sql().contains("updated_at = CURRENT_TIMESTAMP"));
        assert_eq!(stmt.max_placeholder(), 5);
    }

    #[test]
    fn test_find_user_by_id_binds_id() {
        let stmt = find_user_by_id_statement(9);
        assert_eq!(stmt.params(), &[SqlParam::BigInt(Some(9))]);
    }
}
