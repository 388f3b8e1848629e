use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use travelguide_core::types::DbId;
use travelguide_core::validation::{validate_comment_rating, validate_comment_target};
use travelguide_db::models::comment::{CommentFilter, CreateComment, UpdateComment};
use travelguide_db::repositories::CommentRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/comments
///
/// `?destination=` wins over `?attraction=` when both are given.
pub async fn list_comments(
    State(state): State<AppState>,
    Query(filter): Query<CommentFilter>,
) -> AppResult<impl IntoResponse> {
    let comments = CommentRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/comments
///
/// A comment targets exactly one destination or attraction and rates it 1-5.
pub async fn create_comment(
    State(state): State<AppState>,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    validate_comment_target(input.destination_id, input.attraction_id)?;
    validate_comment_rating(input.rating)?;
    if input.content.trim().is_empty() {
        return Err(AppError::BadRequest("Comment content must not be empty".into()));
    }

    let comment = CommentRepo::create(&state.pool, &input).await?;
    tracing::info!(comment_id = comment.id, user_id = comment.user_id, "Comment created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Comment", id))?;
    Ok(Json(DataResponse { data: comment }))
}

/// PUT /api/v1/comments/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<impl IntoResponse> {
    if let Some(rating) = input.rating {
        validate_comment_rating(rating)?;
    }

    let comment = CommentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Comment", id))?;
    Ok(Json(DataResponse { data: comment }))
}

/// DELETE /api/v1/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CommentRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Comment", id));
    }
    tracing::info!(comment_id = id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
