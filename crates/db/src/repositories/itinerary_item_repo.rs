//! Repository for the `itinerary_items` table.

use sqlx::PgPool;
use travelguide_core::types::DbId;

use crate::models::itinerary::{CreateItineraryItem, ItineraryItem, UpdateItineraryItem};

const COLUMNS: &str = "\
    id, day_id, attraction_id, custom_location, start_time, end_time, \
    description, transportation, created_at, updated_at";

/// Provides CRUD operations for the scheduled items of an itinerary day.
pub struct ItineraryItemRepo;

impl ItineraryItemRepo {
    pub async fn create(
        pool: &PgPool,
        day_id: DbId,
        input: &CreateItineraryItem,
    ) -> Result<ItineraryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO itinerary_items
                (day_id, attraction_id, custom_location, start_time, end_time,
                 description, transportation)
             VALUES ($1, $2, COALESCE($3, ''), $4, $5, COALESCE($6, ''), COALESCE($7, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItineraryItem>(&query)
            .bind(day_id)
            .bind(input.attraction_id)
            .bind(&input.custom_location)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.description)
            .bind(&input.transportation)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ItineraryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM itinerary_items WHERE id = $1");
        sqlx::query_as::<_, ItineraryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Items of a day in chronological order.
    pub async fn list_for_day(
        pool: &PgPool,
        day_id: DbId,
    ) -> Result<Vec<ItineraryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM itinerary_items WHERE day_id = $1 ORDER BY start_time, id"
        );
        sqlx::query_as::<_, ItineraryItem>(&query)
            .bind(day_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItineraryItem,
    ) -> Result<Option<ItineraryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE itinerary_items SET
                attraction_id = COALESCE($2, attraction_id),
                custom_location = COALESCE($3, custom_location),
                start_time = COALESCE($4, start_time),
                end_time = COALESCE($5, end_time),
                description = COALESCE($6, description),
                transportation = COALESCE($7, transportation)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItineraryItem>(&query)
            .bind(id)
            .bind(input.attraction_id)
            .bind(&input.custom_location)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.description)
            .bind(&input.transportation)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM itinerary_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
