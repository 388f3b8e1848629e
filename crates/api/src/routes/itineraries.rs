//! Itinerary routes. Days and items are created under their parent and
//! addressed directly afterwards.

use axum::routing::get;
use axum::Router;

use crate::handlers::itineraries;
use crate::state::AppState;

/// Routes mounted at `/itineraries`.
///
/// ```text
/// GET    /                  -> list_itineraries (?user_id)
/// POST   /                  -> create_itinerary
/// GET    /{id}              -> get_itinerary (?user_id)
/// PUT    /{id}              -> update_itinerary
/// DELETE /{id}              -> delete_itinerary
/// GET    /{id}/days         -> list_days
/// POST   /{id}/days         -> create_day
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(itineraries::list_itineraries).post(itineraries::create_itinerary),
        )
        .route(
            "/{id}",
            get(itineraries::get_itinerary)
                .put(itineraries::update_itinerary)
                .delete(itineraries::delete_itinerary),
        )
        .route(
            "/{id}/days",
            get(itineraries::list_days).post(itineraries::create_day),
        )
}

/// Routes mounted at `/itinerary-days`.
///
/// ```text
/// GET    /{id}              -> get_day
/// PUT    /{id}              -> update_day
/// DELETE /{id}              -> delete_day
/// GET    /{id}/items        -> list_items
/// POST   /{id}/items        -> create_item
/// ```
pub fn days_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(itineraries::get_day)
                .put(itineraries::update_day)
                .delete(itineraries::delete_day),
        )
        .route(
            "/{id}/items",
            get(itineraries::list_items).post(itineraries::create_item),
        )
}

/// Routes mounted at `/itinerary-items`.
pub fn items_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(itineraries::get_item)
            .put(itineraries::update_item)
            .delete(itineraries::delete_item),
    )
}
