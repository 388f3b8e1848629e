//! Repository for the `itineraries` table.

use sqlx::PgPool;
use travelguide_core::types::DbId;

use crate::models::itinerary::{CreateItinerary, Itinerary, UpdateItinerary};

const COLUMNS: &str = "\
    id, title, description, user_id, destination_id, start_date, end_date, \
    is_public, created_at, updated_at";

/// Provides CRUD operations for itineraries.
pub struct ItineraryRepo;

impl ItineraryRepo {
    pub async fn create(pool: &PgPool, input: &CreateItinerary) -> Result<Itinerary, sqlx::Error> {
        let query = format!(
            "INSERT INTO itineraries
                (title, description, user_id, destination_id, start_date, end_date, is_public)
             VALUES ($1, COALESCE($2, ''), $3, $4, $5, $6, COALESCE($7, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Itinerary>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.user_id)
            .bind(input.destination_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Itinerary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM itineraries WHERE id = $1");
        sqlx::query_as::<_, Itinerary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public itineraries plus, when `user_id` is given, that user's private ones.
    pub async fn list_visible(
        pool: &PgPool,
        user_id: Option<DbId>,
    ) -> Result<Vec<Itinerary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM itineraries
             WHERE is_public OR user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Itinerary>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItinerary,
    ) -> Result<Option<Itinerary>, sqlx::Error> {
        let query = format!(
            "UPDATE itineraries SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                destination_id = COALESCE($4, destination_id),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                is_public = COALESCE($7, is_public)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Itinerary>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.destination_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Delete an itinerary; its days and items cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM itineraries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
