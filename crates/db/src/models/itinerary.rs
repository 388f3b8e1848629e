//! Itinerary, day, and item models and DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use travelguide_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Itineraries
// ---------------------------------------------------------------------------

/// A row from the `itineraries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Itinerary {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub user_id: DbId,
    pub destination_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateItinerary {
    pub title: String,
    pub description: Option<String>,
    pub user_id: DbId,
    pub destination_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItinerary {
    pub title: Option<String>,
    pub description: Option<String>,
    pub destination_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_public: Option<bool>,
}

/// Listing shows public itineraries plus the caller's own when `user_id` is given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItineraryListParams {
    pub user_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Days
// ---------------------------------------------------------------------------

/// A row from the `itinerary_days` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItineraryDay {
    pub id: DbId,
    pub itinerary_id: DbId,
    pub day_number: i32,
    pub date: NaiveDate,
    pub note: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The parent itinerary comes from the route path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItineraryDay {
    pub day_number: i32,
    pub date: NaiveDate,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItineraryDay {
    pub day_number: Option<i32>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A row from the `itinerary_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItineraryItem {
    pub id: DbId,
    pub day_id: DbId,
    pub attraction_id: Option<DbId>,
    pub custom_location: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: String,
    pub transportation: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The parent day comes from the route path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItineraryItem {
    pub attraction_id: Option<DbId>,
    pub custom_location: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: Option<String>,
    pub transportation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItineraryItem {
    pub attraction_id: Option<DbId>,
    pub custom_location: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub description: Option<String>,
    pub transportation: Option<String>,
}
