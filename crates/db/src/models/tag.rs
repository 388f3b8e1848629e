//! Tag model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use travelguide_core::types::{DbId, Timestamp};

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTag {
    pub name: Option<String>,
    pub category: Option<String>,
}

/// Query parameters for tag listing. `search` matches name or category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagListParams {
    pub search: Option<String>,
}

/// Body for attaching an existing tag to a destination or attraction.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachTag {
    pub tag_id: DbId,
}
