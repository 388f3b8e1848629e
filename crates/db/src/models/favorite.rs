//! Favorite (user bookmarks an attraction) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use travelguide_core::types::{DbId, Timestamp};

/// A row from the `favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub attraction_id: DbId,
    pub note: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFavorite {
    pub user_id: DbId,
    pub attraction_id: DbId,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteListParams {
    pub user_id: DbId,
}
