use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::destinations;
use crate::state::AppState;

/// Routes mounted at `/destinations`.
///
/// ```text
/// GET    /                        -> list_destinations
/// POST   /                        -> create_destination
/// GET    /popular                 -> popular_destinations
/// GET    /{id}                    -> get_destination (counts a view)
/// PUT    /{id}                    -> update_destination
/// DELETE /{id}                    -> delete_destination
/// GET    /{id}/attractions        -> list_destination_attractions
/// GET    /{id}/comments           -> list_destination_comments
/// GET    /{id}/tags               -> list_destination_tags
/// POST   /{id}/tags               -> attach_destination_tag
/// DELETE /{id}/tags/{tag_id}      -> detach_destination_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(destinations::list_destinations).post(destinations::create_destination),
        )
        .route("/popular", get(destinations::popular_destinations))
        .route(
            "/{id}",
            get(destinations::get_destination)
                .put(destinations::update_destination)
                .delete(destinations::delete_destination),
        )
        .route("/{id}/attractions", get(destinations::list_destination_attractions))
        .route("/{id}/comments", get(destinations::list_destination_comments))
        .route(
            "/{id}/tags",
            get(destinations::list_destination_tags).post(destinations::attach_destination_tag),
        )
        .route("/{id}/tags/{tag_id}", delete(destinations::detach_destination_tag))
}
