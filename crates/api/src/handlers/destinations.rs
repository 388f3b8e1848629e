//! Handlers for destinations and their nested collections.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use travelguide_core::types::DbId;
use travelguide_core::validation::validate_place_rating;
use travelguide_db::models::comment::CommentFilter;
use travelguide_db::models::destination::{CreateDestination, UpdateDestination};
use travelguide_db::models::tag::AttachTag;
use travelguide_db::repositories::{AttractionRepo, CommentRepo, DestinationRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// 404 unless the destination exists.
async fn ensure_destination(state: &AppState, id: DbId) -> AppResult<()> {
    DestinationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Destination", id))?;
    Ok(())
}

/// GET /api/v1/destinations
pub async fn list_destinations(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let destinations = DestinationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: destinations }))
}

/// GET /api/v1/destinations/popular
///
/// The three most viewed destinations.
pub async fn popular_destinations(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let destinations = DestinationRepo::popular(&state.pool).await?;
    Ok(Json(DataResponse { data: destinations }))
}

/// POST /api/v1/destinations
pub async fn create_destination(
    State(state): State<AppState>,
    Json(input): Json<CreateDestination>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() || input.location.trim().is_empty() {
        return Err(AppError::BadRequest("title and location are required".into()));
    }
    if let Some(rating) = input.rating {
        validate_place_rating(rating)?;
    }

    let destination = DestinationRepo::create(&state.pool, &input).await?;
    tracing::info!(destination_id = destination.id, title = %destination.title, "Destination created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: destination })))
}

/// GET /api/v1/destinations/{id}
///
/// Each retrieval increments the view counter.
pub async fn get_destination(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let destination = DestinationRepo::record_view(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Destination", id))?;
    Ok(Json(DataResponse { data: destination }))
}

/// PUT /api/v1/destinations/{id}
pub async fn update_destination(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDestination>,
) -> AppResult<impl IntoResponse> {
    if let Some(rating) = input.rating {
        validate_place_rating(rating)?;
    }

    let destination = DestinationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Destination", id))?;
    tracing::info!(destination_id = id, "Destination updated");

    Ok(Json(DataResponse { data: destination }))
}

/// DELETE /api/v1/destinations/{id}
///
/// Cascades to the destination's attractions, comments and itineraries.
pub async fn delete_destination(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !DestinationRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Destination", id));
    }
    tracing::info!(destination_id = id, "Destination deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/destinations/{id}/attractions
pub async fn list_destination_attractions(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_destination(&state, id).await?;
    let attractions = AttractionRepo::list_by_destination(&state.pool, id).await?;
    Ok(Json(DataResponse { data: attractions }))
}

/// GET /api/v1/destinations/{id}/comments
pub async fn list_destination_comments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_destination(&state, id).await?;
    let filter = CommentFilter {
        destination: Some(id),
        attraction: None,
    };
    let comments = CommentRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// GET /api/v1/destinations/{id}/tags
pub async fn list_destination_tags(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_destination(&state, id).await?;
    let tags = TagRepo::list_for_destination(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/destinations/{id}/tags
///
/// Attaching a tag twice is a no-op. Returns the destination's tags.
pub async fn attach_destination_tag(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AttachTag>,
) -> AppResult<impl IntoResponse> {
    ensure_destination(&state, id).await?;
    TagRepo::find_by_id(&state.pool, input.tag_id)
        .await?
        .ok_or(AppError::not_found("Tag", input.tag_id))?;

    TagRepo::attach_to_destination(&state.pool, id, input.tag_id).await?;
    tracing::info!(destination_id = id, tag_id = input.tag_id, "Tag attached to destination");

    let tags = TagRepo::list_for_destination(&state.pool, id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: tags })))
}

/// DELETE /api/v1/destinations/{id}/tags/{tag_id}
pub async fn detach_destination_tag(
    State(state): State<AppState>,
    Path((id, tag_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    if !TagRepo::detach_from_destination(&state.pool, id, tag_id).await? {
        return Err(AppError::not_found("DestinationTag", tag_id));
    }
    Ok(StatusCode::NO_CONTENT)
}
