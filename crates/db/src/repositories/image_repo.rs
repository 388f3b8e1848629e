//! Repository for the `images` table.

use sqlx::PgPool;
use travelguide_core::types::DbId;

use crate::models::image::{CreateImage, Image};

const COLUMNS: &str = "id, title, file_path, width, height, file_size_bytes, created_at, updated_at";

/// Provides access to managed image assets.
pub struct ImageRepo;

impl ImageRepo {
    /// Register a stored image file, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateImage) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (title, file_path, width, height, file_size_bytes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(&input.title)
            .bind(&input.file_path)
            .bind(input.width)
            .bind(input.height)
            .bind(input.file_size_bytes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM images")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
