use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::attractions;
use crate::state::AppState;

/// Routes mounted at `/attractions`.
///
/// ```text
/// GET    /                        -> list_attractions (?destination, ?category, ?tag)
/// POST   /                        -> create_attraction
/// GET    /{id}                    -> get_attraction (counts a view)
/// PUT    /{id}                    -> update_attraction
/// DELETE /{id}                    -> delete_attraction
/// GET    /{id}/images             -> list_attraction_images
/// GET    /{id}/comments           -> list_attraction_comments
/// GET    /{id}/tags               -> list_attraction_tags
/// POST   /{id}/tags               -> attach_attraction_tag
/// DELETE /{id}/tags/{tag_id}      -> detach_attraction_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(attractions::list_attractions).post(attractions::create_attraction),
        )
        .route(
            "/{id}",
            get(attractions::get_attraction)
                .put(attractions::update_attraction)
                .delete(attractions::delete_attraction),
        )
        .route("/{id}/images", get(attractions::list_attraction_images))
        .route("/{id}/comments", get(attractions::list_attraction_comments))
        .route(
            "/{id}/tags",
            get(attractions::list_attraction_tags).post(attractions::attach_attraction_tag),
        )
        .route("/{id}/tags/{tag_id}", delete(attractions::detach_attraction_tag))
}
