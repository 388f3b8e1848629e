//! Repository for the `favorites` table.

use sqlx::PgPool;
use travelguide_core::types::DbId;

use crate::models::favorite::{CreateFavorite, Favorite};

const COLUMNS: &str = "id, user_id, attraction_id, note, created_at, updated_at";

/// Provides operations on a user's favorite attractions.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert a favorite. A duplicate `(user_id, attraction_id)` pair
    /// violates `uq_favorites_user_attraction`.
    pub async fn create(pool: &PgPool, input: &CreateFavorite) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (user_id, attraction_id, note)
             VALUES ($1, $2, COALESCE($3, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(input.user_id)
            .bind(input.attraction_id)
            .bind(&input.note)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Favorite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM favorites WHERE id = $1");
        sqlx::query_as::<_, Favorite>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Favorite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM favorites WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
