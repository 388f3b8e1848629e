//! Repository for the `itinerary_days` table.

use sqlx::PgPool;
use travelguide_core::types::DbId;

use crate::models::itinerary::{CreateItineraryDay, ItineraryDay, UpdateItineraryDay};

const COLUMNS: &str = "id, itinerary_id, day_number, date, note, created_at, updated_at";

/// Provides CRUD operations for the days of an itinerary.
pub struct ItineraryDayRepo;

impl ItineraryDayRepo {
    /// Insert a day. A repeated `day_number` within the itinerary violates
    /// `uq_itinerary_days_day_number`.
    pub async fn create(
        pool: &PgPool,
        itinerary_id: DbId,
        input: &CreateItineraryDay,
    ) -> Result<ItineraryDay, sqlx::Error> {
        let query = format!(
            "INSERT INTO itinerary_days (itinerary_id, day_number, date, note)
             VALUES ($1, $2, $3, COALESCE($4, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItineraryDay>(&query)
            .bind(itinerary_id)
            .bind(input.day_number)
            .bind(input.date)
            .bind(&input.note)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ItineraryDay>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM itinerary_days WHERE id = $1");
        sqlx::query_as::<_, ItineraryDay>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_itinerary(
        pool: &PgPool,
        itinerary_id: DbId,
    ) -> Result<Vec<ItineraryDay>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM itinerary_days WHERE itinerary_id = $1 ORDER BY day_number"
        );
        sqlx::query_as::<_, ItineraryDay>(&query)
            .bind(itinerary_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItineraryDay,
    ) -> Result<Option<ItineraryDay>, sqlx::Error> {
        let query = format!(
            "UPDATE itinerary_days SET
                day_number = COALESCE($2, day_number),
                date = COALESCE($3, date),
                note = COALESCE($4, note)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItineraryDay>(&query)
            .bind(id)
            .bind(input.day_number)
            .bind(input.date)
            .bind(&input.note)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM itinerary_days WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
