//! Registration and user lookup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use travelguide_core::error::CoreError;
use travelguide_core::types::DbId;
use travelguide_core::validation::validate_registration;
use travelguide_db::models::user::CreateUser;
use travelguide_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::password::hash_password;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /users/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/v1/users/register
///
/// Rejects missing fields and weak passwords, then taken usernames or
/// emails, all with 400 and per-field messages.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let username = input.username.trim();
    let email = input.email.trim();
    validate_registration(username, email, &input.password, state.config.password_min_length)?;

    if UserRepo::username_exists(&state.pool, username).await? {
        return Err(CoreError::FieldErrors(vec![(
            "username".into(),
            vec!["A user with that username already exists".into()],
        )])
        .into());
    }
    if UserRepo::email_exists(&state.pool, email).await? {
        return Err(CoreError::FieldErrors(vec![(
            "email".into(),
            vec!["A user with that email already exists".into()],
        )])
        .into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    Ok(Json(DataResponse { data: user }))
}
