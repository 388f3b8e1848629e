//! Managed image assets and attraction gallery rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use travelguide_core::types::{DbId, Timestamp};

/// A row from the `images` table. `file_path` is relative to the media root.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub title: String,
    pub file_path: String,
    pub width: i32,
    pub height: i32,
    pub file_size_bytes: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a transcoded file that is already on disk.
#[derive(Debug, Clone)]
pub struct CreateImage {
    pub title: String,
    pub file_path: String,
    pub width: i32,
    pub height: i32,
    pub file_size_bytes: i64,
}

/// A row from the `attraction_images` gallery table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttractionImage {
    pub id: DbId,
    pub attraction_id: DbId,
    pub image_id: DbId,
    pub title: String,
    pub description: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Gallery entry joined with its image file, as listed by the API.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryEntry {
    pub id: DbId,
    pub image_id: DbId,
    pub title: String,
    pub description: String,
    pub sort_order: i32,
    pub file_path: String,
    pub width: i32,
    pub height: i32,
    pub created_at: Timestamp,
}

/// A gallery row to attach to an attraction during an upsert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttractionImage {
    pub image_id: DbId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub sort_order: i32,
}
