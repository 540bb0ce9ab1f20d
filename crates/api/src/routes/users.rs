//! User endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::user::{CreateUserRequest, ListUsersResponse, UpdateUserRequest};
use domain::models::{CreatedUser, UpdatedUser, User};
use persistence::repositories::{NewUser, UserRepository, UserUpdate};
use shared::password::hash_password;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<ListUsersResponse>, ApiError> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.get_users().await?.into_iter().map(User::from).collect();

    Ok(Json(ListUsersResponse { users }))
}

/// GET /api/v1/users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// POST /api/v1/users
///
/// The password is hashed with Argon2id before it reaches the database.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let password_hash =
        hash_password(&request.password).map_err(|e| ApiError::Internal(e.to_string()))?;

    let repo = UserRepository::new(state.db.clone());
    let created = repo
        .create_user(&NewUser {
            email: request.email.trim().to_lowercase(),
            name: request.name,
            password_hash,
            role: request.role,
        })
        .await?;

    info!(user_id = created.id, role = %created.role, "User created");

    Ok((StatusCode::CREATED, Json(CreatedUser::from(created))))
}

/// PATCH /api/v1/users/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UpdatedUser>, ApiError> {
    request.validate()?;

    let update = UserUpdate {
        email: request.email.map(|e| e.trim().to_lowercase()),
        name: request.name,
        role: request.role,
        is_active: request.is_active,
    };

    let repo = UserRepository::new(state.db.clone());
    let updated = repo
        .update_user(user_id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    info!(user_id = updated.id, "User updated");

    Ok(Json(updated.into()))
}
