//! Handlers for itineraries and their day/item hierarchy.
//!
//! A private itinerary is only visible to its owner. Without
//! authentication the caller identifies itself with `?user_id=`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use travelguide_core::types::DbId;
use travelguide_core::validation::{
    validate_date_range, validate_day_number, validate_itinerary_item_target,
};
use travelguide_db::models::itinerary::{
    CreateItinerary, CreateItineraryDay, CreateItineraryItem, Itinerary, ItineraryListParams,
    UpdateItinerary, UpdateItineraryDay, UpdateItineraryItem,
};
use travelguide_db::repositories::{ItineraryDayRepo, ItineraryItemRepo, ItineraryRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Load an itinerary the caller may see, or 404.
async fn visible_itinerary(state: &AppState, id: DbId, viewer: Option<DbId>) -> AppResult<Itinerary> {
    ItineraryRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|it| it.is_public || viewer == Some(it.user_id))
        .ok_or(AppError::not_found("Itinerary", id))
}

// ---------------------------------------------------------------------------
// Itineraries
// ---------------------------------------------------------------------------

/// GET /api/v1/itineraries
///
/// Public itineraries plus the caller's own private ones.
pub async fn list_itineraries(
    State(state): State<AppState>,
    Query(params): Query<ItineraryListParams>,
) -> AppResult<impl IntoResponse> {
    let itineraries = ItineraryRepo::list_visible(&state.pool, params.user_id).await?;
    Ok(Json(DataResponse { data: itineraries }))
}

/// POST /api/v1/itineraries
pub async fn create_itinerary(
    State(state): State<AppState>,
    Json(input): Json<CreateItinerary>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("Itinerary title must not be empty".into()));
    }
    validate_date_range(input.start_date, input.end_date)?;

    let itinerary = ItineraryRepo::create(&state.pool, &input).await?;
    tracing::info!(itinerary_id = itinerary.id, user_id = itinerary.user_id, "Itinerary created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: itinerary })))
}

/// GET /api/v1/itineraries/{id}
pub async fn get_itinerary(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ItineraryListParams>,
) -> AppResult<impl IntoResponse> {
    let itinerary = visible_itinerary(&state, id, params.user_id).await?;
    Ok(Json(DataResponse { data: itinerary }))
}

/// PUT /api/v1/itineraries/{id}
///
/// The resulting date range is validated against the stored row.
pub async fn update_itinerary(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateItinerary>,
) -> AppResult<impl IntoResponse> {
    let current = ItineraryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Itinerary", id))?;
    validate_date_range(
        input.start_date.unwrap_or(current.start_date),
        input.end_date.unwrap_or(current.end_date),
    )?;

    let itinerary = ItineraryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Itinerary", id))?;
    tracing::info!(itinerary_id = id, "Itinerary updated");

    Ok(Json(DataResponse { data: itinerary }))
}

/// DELETE /api/v1/itineraries/{id}
///
/// Days and items go with it.
pub async fn delete_itinerary(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ItineraryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Itinerary", id));
    }
    tracing::info!(itinerary_id = id, "Itinerary deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Days
// ---------------------------------------------------------------------------

/// GET /api/v1/itineraries/{id}/days
pub async fn list_days(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ItineraryListParams>,
) -> AppResult<impl IntoResponse> {
    visible_itinerary(&state, id, params.user_id).await?;
    let days = ItineraryDayRepo::list_for_itinerary(&state.pool, id).await?;
    Ok(Json(DataResponse { data: days }))
}

/// POST /api/v1/itineraries/{id}/days
///
/// Day numbers start at 1 and are unique within the itinerary.
pub async fn create_day(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateItineraryDay>,
) -> AppResult<impl IntoResponse> {
    validate_day_number(input.day_number)?;
    ItineraryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Itinerary", id))?;

    let day = ItineraryDayRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: day })))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let day = ItineraryDayRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ItineraryDay", id))?;
    Ok(Json(DataResponse { data: day }))
}

pub async fn update_day(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateItineraryDay>,
) -> AppResult<impl IntoResponse> {
    if let Some(day_number) = input.day_number {
        validate_day_number(day_number)?;
    }
    let day = ItineraryDayRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("ItineraryDay", id))?;
    Ok(Json(DataResponse { data: day }))
}

pub async fn delete_day(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ItineraryDayRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("ItineraryDay", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// GET /api/v1/itinerary-days/{id}/items
///
/// Ordered by start time.
pub async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ItineraryDayRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ItineraryDay", id))?;
    let items = ItineraryItemRepo::list_for_day(&state.pool, id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/itinerary-days/{id}/items
///
/// An item needs an attraction or a custom location.
pub async fn create_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateItineraryItem>,
) -> AppResult<impl IntoResponse> {
    validate_itinerary_item_target(input.attraction_id, input.custom_location.as_deref())?;
    ItineraryDayRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ItineraryDay", id))?;

    let item = ItineraryItemRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItineraryItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ItineraryItem", id))?;
    Ok(Json(DataResponse { data: item }))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateItineraryItem>,
) -> AppResult<impl IntoResponse> {
    let item = ItineraryItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("ItineraryItem", id))?;
    Ok(Json(DataResponse { data: item }))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ItineraryItemRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("ItineraryItem", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
