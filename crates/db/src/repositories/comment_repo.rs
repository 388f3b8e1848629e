//! Repository for the `comments` table.

use sqlx::PgPool;
use travelguide_core::types::DbId;

use crate::models::comment::{Comment, CommentFilter, CreateComment, UpdateComment};

const COLUMNS: &str =
    "id, user_id, destination_id, attraction_id, content, rating, created_at, updated_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment. The caller validates the target and rating first.
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (user_id, destination_id, attraction_id, content, rating)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.user_id)
            .bind(input.destination_id)
            .bind(input.attraction_id)
            .bind(&input.content)
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List comments newest first. A destination filter wins over an
    /// attraction filter; with neither, every comment is returned.
    pub async fn list(pool: &PgPool, filter: &CommentFilter) -> Result<Vec<Comment>, sqlx::Error> {
        let (condition, target) = match (filter.destination, filter.attraction) {
            (Some(id), _) => ("WHERE destination_id = $1", Some(id)),
            (None, Some(id)) => ("WHERE attraction_id = $1", Some(id)),
            (None, None) => ("", None),
        };
        let query = format!(
            "SELECT {COLUMNS} FROM comments {condition} ORDER BY created_at DESC, id DESC"
        );
        let mut q = sqlx::query_as::<_, Comment>(&query);
        if let Some(id) = target {
            q = q.bind(id);
        }
        q.fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComment,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET
                content = COALESCE($2, content),
                rating = COALESCE($3, rating)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(&input.content)
            .bind(input.rating)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
