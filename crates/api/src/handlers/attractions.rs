//! Handlers for attractions, their gallery, comments and tags.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use travelguide_core::types::DbId;
use travelguide_core::validation::validate_place_rating;
use travelguide_db::models::attraction::{AttractionFilter, CreateAttraction, UpdateAttraction};
use travelguide_db::models::comment::CommentFilter;
use travelguide_db::models::tag::AttachTag;
use travelguide_db::repositories::{AttractionRepo, CommentRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_attraction(state: &AppState, id: DbId) -> AppResult<()> {
    AttractionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Attraction", id))?;
    Ok(())
}

/// GET /api/v1/attractions
///
/// Filters combine: `destination` (id), `category` (exact label), `tag`
/// (tag name).
pub async fn list_attractions(
    State(state): State<AppState>,
    Query(filter): Query<AttractionFilter>,
) -> AppResult<impl IntoResponse> {
    let attractions = AttractionRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: attractions }))
}

/// POST /api/v1/attractions
pub async fn create_attraction(
    State(state): State<AppState>,
    Json(input): Json<CreateAttraction>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() || input.location.trim().is_empty() {
        return Err(AppError::BadRequest("name and location are required".into()));
    }
    if let Some(rating) = input.rating {
        validate_place_rating(rating)?;
    }

    let attraction = AttractionRepo::create(&state.pool, &input).await?;
    tracing::info!(
        attraction_id = attraction.id,
        destination_id = attraction.destination_id,
        "Attraction created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: attraction })))
}

/// GET /api/v1/attractions/{id}
///
/// Each retrieval increments the view counter.
pub async fn get_attraction(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let attraction = AttractionRepo::record_view(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Attraction", id))?;
    Ok(Json(DataResponse { data: attraction }))
}

/// PUT /api/v1/attractions/{id}
pub async fn update_attraction(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAttraction>,
) -> AppResult<impl IntoResponse> {
    if let Some(rating) = input.rating {
        validate_place_rating(rating)?;
    }

    let attraction = AttractionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Attraction", id))?;
    tracing::info!(attraction_id = id, "Attraction updated");

    Ok(Json(DataResponse { data: attraction }))
}

/// DELETE /api/v1/attractions/{id}
pub async fn delete_attraction(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AttractionRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Attraction", id));
    }
    tracing::info!(attraction_id = id, "Attraction deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/attractions/{id}/images
///
/// Gallery entries in display order, with file path and dimensions.
pub async fn list_attraction_images(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_attraction(&state, id).await?;
    let gallery = AttractionRepo::list_gallery(&state.pool, id).await?;
    Ok(Json(DataResponse { data: gallery }))
}

/// GET /api/v1/attractions/{id}/comments
pub async fn list_attraction_comments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_attraction(&state, id).await?;
    let filter = CommentFilter {
        destination: None,
        attraction: Some(id),
    };
    let comments = CommentRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// GET /api/v1/attractions/{id}/tags
pub async fn list_attraction_tags(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_attraction(&state, id).await?;
    let tags = TagRepo::list_for_attraction(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/attractions/{id}/tags
pub async fn attach_attraction_tag(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AttachTag>,
) -> AppResult<impl IntoResponse> {
    ensure_attraction(&state, id).await?;
    TagRepo::find_by_id(&state.pool, input.tag_id)
        .await?
        .ok_or(AppError::not_found("Tag", input.tag_id))?;

    TagRepo::attach_to_attraction(&state.pool, id, input.tag_id).await?;
    tracing::info!(attraction_id = id, tag_id = input.tag_id, "Tag attached to attraction");

    let tags = TagRepo::list_for_attraction(&state.pool, id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: tags })))
}

/// DELETE /api/v1/attractions/{id}/tags/{tag_id}
pub async fn detach_attraction_tag(
    State(state): State<AppState>,
    Path((id, tag_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    if !TagRepo::detach_from_attraction(&state.pool, id, tag_id).await? {
        return Err(AppError::not_found("AttractionTag", tag_id));
    }
    Ok(StatusCode::NO_CONTENT)
}
