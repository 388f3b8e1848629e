use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use travelguide_core::types::DbId;
use travelguide_db::models::favorite::{CreateFavorite, FavoriteListParams};
use travelguide_db::repositories::FavoriteRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/favorites?user_id=
///
/// Favorites belong to one user; `user_id` is required.
pub async fn list_favorites(
    State(state): State<AppState>,
    Query(params): Query<FavoriteListParams>,
) -> AppResult<impl IntoResponse> {
    let favorites = FavoriteRepo::list_for_user(&state.pool, params.user_id).await?;
    Ok(Json(DataResponse { data: favorites }))
}

/// POST /api/v1/favorites
///
/// Favoriting the same attraction twice is a 409.
pub async fn create_favorite(
    State(state): State<AppState>,
    Json(input): Json<CreateFavorite>,
) -> AppResult<impl IntoResponse> {
    let favorite = FavoriteRepo::create(&state.pool, &input).await?;
    tracing::info!(
        favorite_id = favorite.id,
        user_id = favorite.user_id,
        attraction_id = favorite.attraction_id,
        "Favorite created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: favorite })))
}

pub async fn get_favorite(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let favorite = FavoriteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Favorite", id))?;
    Ok(Json(DataResponse { data: favorite }))
}

pub async fn delete_favorite(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !FavoriteRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Favorite", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
