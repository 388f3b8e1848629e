use axum::routing::get;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// GET    /                  -> list_comments (?destination, ?attraction)
/// POST   /                  -> create_comment
/// GET    /{id}              -> get_comment
/// PUT    /{id}              -> update_comment
/// DELETE /{id}              -> delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(comments::list_comments).post(comments::create_comment))
        .route(
            "/{id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
}
