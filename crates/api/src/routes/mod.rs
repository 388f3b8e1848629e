pub mod attractions;
pub mod comments;
pub mod destinations;
pub mod favorites;
pub mod health;
pub mod itineraries;
pub mod tags;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /users                        register, get
/// /destinations                 CRUD, popular, nested attractions/comments/tags
/// /attractions                  CRUD + filters, nested images/comments/tags
/// /tags                         CRUD + search
/// /comments                     CRUD + target filters
/// /itineraries                  CRUD, nested days
/// /itinerary-days               get, update, delete, nested items
/// /itinerary-items              get, update, delete
/// /favorites                    list per user, create, get, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/destinations", destinations::router())
        .nest("/attractions", attractions::router())
        .nest("/tags", tags::router())
        .nest("/comments", comments::router())
        .nest("/itineraries", itineraries::router())
        .nest("/itinerary-days", itineraries::days_router())
        .nest("/itinerary-items", itineraries::items_router())
        .nest("/favorites", favorites::router())
}
