//! Destination entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use travelguide_core::types::{DbId, Timestamp};

/// A row from the `destinations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Destination {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub cover_image_id: Option<DbId>,
    pub location: String,
    pub province: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: String,
    pub best_season: String,
    pub views_count: i64,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a destination.
///
/// Omitted optional fields take the column defaults (country "中国",
/// category "城市", rating 5.0).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDestination {
    pub title: String,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub cover_image_id: Option<DbId>,
    pub location: String,
    pub province: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: Option<String>,
    pub best_season: Option<String>,
    pub rating: Option<f64>,
}

/// DTO for updating a destination. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDestination {
    pub title: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub cover_image_id: Option<DbId>,
    pub location: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: Option<String>,
    pub best_season: Option<String>,
    pub rating: Option<f64>,
}

/// Result of writing an imported destination.
#[derive(Debug, Clone)]
pub enum DestinationImport {
    Created(Destination),
    Updated(Destination),
    /// A destination with the same title exists and overwriting was not requested.
    Skipped,
}
