//! Repository for the `tags` table and its destination/attraction join tables.

use sqlx::PgPool;
use travelguide_core::types::DbId;

use crate::models::tag::{CreateTag, Tag, TagListParams, UpdateTag};

const COLUMNS: &str = "id, name, category, created_at, updated_at";

/// Provides CRUD operations for tags and tag associations.
pub struct TagRepo;

impl TagRepo {
    pub async fn create(pool: &PgPool, input: &CreateTag) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, category) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(input.name.trim())
            .bind(input.category.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tags by name, optionally filtered by a case-insensitive
    /// substring of the name or category.
    pub async fn list(pool: &PgPool, params: &TagListParams) -> Result<Vec<Tag>, sqlx::Error> {
        let pattern = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));

        let query = format!(
            "SELECT {COLUMNS} FROM tags
             WHERE $1::TEXT IS NULL OR name ILIKE $1 OR category ILIKE $1
             ORDER BY name"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTag,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET
                name = COALESCE($2, name),
                category = COALESCE($3, category)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.category.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Associations
    // -----------------------------------------------------------------------

    /// Tag a destination. Attaching an already-attached tag is a no-op.
    pub async fn attach_to_destination(
        pool: &PgPool,
        destination_id: DbId,
        tag_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO destination_tags (destination_id, tag_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_destination_tags DO NOTHING",
        )
        .bind(destination_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn detach_from_destination(
        pool: &PgPool,
        destination_id: DbId,
        tag_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM destination_tags WHERE destination_id = $1 AND tag_id = $2")
                .bind(destination_id)
                .bind(tag_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_for_destination(
        pool: &PgPool,
        destination_id: DbId,
    ) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.category, t.created_at, t.updated_at
             FROM tags t
             JOIN destination_tags dt ON dt.tag_id = t.id
             WHERE dt.destination_id = $1
             ORDER BY t.name",
        )
        .bind(destination_id)
        .fetch_all(pool)
        .await
    }

    /// Tag an attraction. Attaching an already-attached tag is a no-op.
    pub async fn attach_to_attraction(
        pool: &PgPool,
        attraction_id: DbId,
        tag_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO attraction_tags (attraction_id, tag_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_attraction_tags DO NOTHING",
        )
        .bind(attraction_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn detach_from_attraction(
        pool: &PgPool,
        attraction_id: DbId,
        tag_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM attraction_tags WHERE attraction_id = $1 AND tag_id = $2")
                .bind(attraction_id)
                .bind(tag_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_for_attraction(
        pool: &PgPool,
        attraction_id: DbId,
    ) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.category, t.created_at, t.updated_at
             FROM tags t
             JOIN attraction_tags atg ON atg.tag_id = t.id
             WHERE atg.attraction_id = $1
             ORDER BY t.name",
        )
        .bind(attraction_id)
        .fetch_all(pool)
        .await
    }
}
