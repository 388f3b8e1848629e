//! Comment model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use travelguide_core::types::{DbId, Timestamp};

/// A row from the `comments` table. Exactly one target id is set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub user_id: DbId,
    pub destination_id: Option<DbId>,
    pub attraction_id: Option<DbId>,
    pub content: String,
    pub rating: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub user_id: DbId,
    pub destination_id: Option<DbId>,
    pub attraction_id: Option<DbId>,
    pub content: String,
    pub rating: i16,
}

/// Only the text and rating of a comment can change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComment {
    pub content: Option<String>,
    pub rating: Option<i16>,
}

/// List filters. `destination` takes precedence over `attraction`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentFilter {
    pub destination: Option<DbId>,
    pub attraction: Option<DbId>,
}
