use axum::routing::get;
use axum::Router;

use crate::handlers::favorites;
use crate::state::AppState;

/// Routes mounted at `/favorites`.
///
/// ```text
/// GET    /                  -> list_favorites (?user_id)
/// POST   /                  -> create_favorite
/// GET    /{id}              -> get_favorite
/// DELETE /{id}              -> delete_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::list_favorites).post(favorites::create_favorite))
        .route(
            "/{id}",
            get(favorites::get_favorite).delete(favorites::delete_favorite),
        )
}
