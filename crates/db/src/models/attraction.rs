//! Attraction entity model, DTOs, and import/clear results.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use travelguide_core::types::{DbId, Timestamp};

/// A row from the `attractions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attraction {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub destination_id: DbId,
    pub cover_image_id: Option<DbId>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_hours: String,
    pub ticket_price: Option<BigDecimal>,
    pub category: String,
    pub rating: f64,
    pub views_count: i64,
    pub recommended_duration: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an attraction, also used as the upsert payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAttraction {
    pub name: String,
    pub description: Option<String>,
    pub destination_id: DbId,
    pub cover_image_id: Option<DbId>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_hours: Option<String>,
    pub ticket_price: Option<BigDecimal>,
    pub category: Option<String>,
    pub rating: Option<f64>,
    pub recommended_duration: Option<String>,
}

/// DTO for updating an attraction. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAttraction {
    pub name: Option<String>,
    pub description: Option<String>,
    pub destination_id: Option<DbId>,
    pub cover_image_id: Option<DbId>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_hours: Option<String>,
    pub ticket_price: Option<BigDecimal>,
    pub category: Option<String>,
    pub rating: Option<f64>,
    pub recommended_duration: Option<String>,
}

/// Query filters for listing attractions. Filters combine with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttractionFilter {
    pub destination: Option<DbId>,
    pub category: Option<String>,
    /// Tag name.
    pub tag: Option<String>,
}

/// An attraction written by an upsert, with whether the row was new.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedAttraction {
    #[sqlx(flatten)]
    pub attraction: Attraction,
    pub inserted: bool,
}

/// Counts and orphaned files from a bulk attraction clear.
#[derive(Debug, Clone, Default)]
pub struct ClearedAttractions {
    pub gallery_rows: u64,
    pub attractions: u64,
    pub images: u64,
    /// Media-root-relative paths of the deleted image rows.
    pub file_paths: Vec<String>,
}
