//! Repository for the `attractions` and `attraction_images` tables.
//!
//! Besides CRUD this holds the two collector writes: the natural-key
//! upsert with its gallery rows, and the bulk clear.

use sqlx::PgPool;
use travelguide_core::types::DbId;

use crate::models::attraction::{
    Attraction, AttractionFilter, ClearedAttractions, CreateAttraction, UpdateAttraction,
    UpsertedAttraction,
};
use crate::models::image::{CreateAttractionImage, GalleryEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, name, description, destination_id, cover_image_id, location, \
    latitude, longitude, opening_hours, ticket_price, category, rating, \
    views_count, recommended_duration, created_at, updated_at";

/// Provides CRUD operations for attractions and their galleries.
pub struct AttractionRepo;

impl AttractionRepo {
    /// Insert a new attraction, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAttraction) -> Result<Attraction, sqlx::Error> {
        let query = format!(
            "INSERT INTO attractions
                (name, description, destination_id, cover_image_id, location, latitude,
                 longitude, opening_hours, ticket_price, category, rating, recommended_duration)
             VALUES ($1, COALESCE($2, ''), $3, $4, $5, $6, $7, COALESCE($8, ''), $9,
                     COALESCE($10, '景点'), COALESCE($11, 5.0), COALESCE($12, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attraction>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.destination_id)
            .bind(input.cover_image_id)
            .bind(&input.location)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.opening_hours)
            .bind(&input.ticket_price)
            .bind(&input.category)
            .bind(input.rating)
            .bind(&input.recommended_duration)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attraction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attractions WHERE id = $1");
        sqlx::query_as::<_, Attraction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List attractions matching every filter that is set.
    pub async fn list(
        pool: &PgPool,
        filter: &AttractionFilter,
    ) -> Result<Vec<Attraction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attractions
             WHERE ($1::BIGINT IS NULL OR destination_id = $1)
               AND ($2::TEXT IS NULL OR category = $2)
               AND ($3::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM attraction_tags
                    JOIN tags ON tags.id = attraction_tags.tag_id
                    WHERE attraction_tags.attraction_id = attractions.id
                      AND tags.name = $3))
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Attraction>(&query)
            .bind(filter.destination)
            .bind(&filter.category)
            .bind(&filter.tag)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_destination(
        pool: &PgPool,
        destination_id: DbId,
    ) -> Result<Vec<Attraction>, sqlx::Error> {
        Self::list(
            pool,
            &AttractionFilter {
                destination: Some(destination_id),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn count_by_destination(
        pool: &PgPool,
        destination_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM attractions WHERE destination_id = $1")
                .bind(destination_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Bump the view counter and return the updated row.
    pub async fn record_view(pool: &PgPool, id: DbId) -> Result<Option<Attraction>, sqlx::Error> {
        let query = format!(
            "UPDATE attractions SET views_count = views_count + 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attraction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update an attraction. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAttraction,
    ) -> Result<Option<Attraction>, sqlx::Error> {
        let query = format!(
            "UPDATE attractions SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                destination_id = COALESCE($4, destination_id),
                cover_image_id = COALESCE($5, cover_image_id),
                location = COALESCE($6, location),
                latitude = COALESCE($7, latitude),
                longitude = COALESCE($8, longitude),
                opening_hours = COALESCE($9, opening_hours),
                ticket_price = COALESCE($10, ticket_price),
                category = COALESCE($11, category),
                rating = COALESCE($12, rating),
                recommended_duration = COALESCE($13, recommended_duration)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attraction>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.destination_id)
            .bind(input.cover_image_id)
            .bind(&input.location)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.opening_hours)
            .bind(&input.ticket_price)
            .bind(&input.category)
            .bind(input.rating)
            .bind(&input.recommended_duration)
            .fetch_optional(pool)
            .await
    }

    /// Delete an attraction by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attractions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Gallery
    // -----------------------------------------------------------------------

    /// Gallery of an attraction in display order.
    pub async fn list_gallery(
        pool: &PgPool,
        attraction_id: DbId,
    ) -> Result<Vec<GalleryEntry>, sqlx::Error> {
        sqlx::query_as::<_, GalleryEntry>(
            "SELECT ai.id, ai.image_id, ai.title, ai.description, ai.sort_order,
                    i.file_path, i.width, i.height, ai.created_at
             FROM attraction_images ai
             JOIN images i ON i.id = ai.image_id
             WHERE ai.attraction_id = $1
             ORDER BY ai.sort_order, ai.created_at, ai.id",
        )
        .bind(attraction_id)
        .fetch_all(pool)
        .await
    }

    pub async fn count_gallery(pool: &PgPool, attraction_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM attraction_images WHERE attraction_id = $1")
                .bind(attraction_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Collector writes
    // -----------------------------------------------------------------------

    /// Insert or update an attraction keyed by `(name, destination_id)` and
    /// append its gallery rows, in one transaction.
    ///
    /// On conflict the imported fields are overwritten, the cover is only
    /// replaced when a new one is supplied, and `views_count`,
    /// `opening_hours`, `ticket_price` and `recommended_duration` are kept.
    /// Gallery rows are always inserted, so repeated imports accumulate them.
    pub async fn upsert_with_gallery(
        pool: &PgPool,
        input: &CreateAttraction,
        gallery: &[CreateAttractionImage],
    ) -> Result<UpsertedAttraction, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO attractions
                (name, description, destination_id, cover_image_id, location, latitude,
                 longitude, opening_hours, ticket_price, category, rating, recommended_duration)
             VALUES ($1, COALESCE($2, ''), $3, $4, $5, $6, $7, COALESCE($8, ''), $9,
                     COALESCE($10, '景点'), COALESCE($11, 5.0), COALESCE($12, ''))
             ON CONFLICT ON CONSTRAINT uq_attractions_name_destination DO UPDATE SET
                description = EXCLUDED.description,
                cover_image_id = COALESCE(EXCLUDED.cover_image_id, attractions.cover_image_id),
                location = EXCLUDED.location,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                category = EXCLUDED.category,
                rating = EXCLUDED.rating
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let upserted = sqlx::query_as::<_, UpsertedAttraction>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.destination_id)
            .bind(input.cover_image_id)
            .bind(&input.location)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.opening_hours)
            .bind(&input.ticket_price)
            .bind(&input.category)
            .bind(input.rating)
            .bind(&input.recommended_duration)
            .fetch_one(&mut *tx)
            .await?;

        for entry in gallery {
            sqlx::query(
                "INSERT INTO attraction_images (attraction_id, image_id, title, description, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(upserted.attraction.id)
            .bind(entry.image_id)
            .bind(&entry.title)
            .bind(&entry.description)
            .bind(entry.sort_order)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(upserted)
    }

    /// Delete every gallery row, every attraction, and every image that was
    /// an attraction cover or gallery image, in one transaction.
    ///
    /// Images shared between covers and galleries are counted once. Files on
    /// disk are left to the caller, which gets their paths back.
    pub async fn clear_all(pool: &PgPool) -> Result<ClearedAttractions, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let image_ids: Vec<(DbId,)> = sqlx::query_as(
            "SELECT cover_image_id FROM attractions WHERE cover_image_id IS NOT NULL
             UNION
             SELECT image_id FROM attraction_images",
        )
        .fetch_all(&mut *tx)
        .await?;
        let image_ids: Vec<DbId> = image_ids.into_iter().map(|(id,)| id).collect();

        let gallery_rows = sqlx::query("DELETE FROM attraction_images")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::debug!(gallery_rows, "Deleted attraction gallery rows");

        let attractions = sqlx::query("DELETE FROM attractions")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::debug!(attractions, "Deleted attractions");

        let deleted: Vec<(String,)> =
            sqlx::query_as("DELETE FROM images WHERE id = ANY($1) RETURNING file_path")
                .bind(&image_ids)
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(ClearedAttractions {
            gallery_rows,
            attractions,
            images: deleted.len() as u64,
            file_paths: deleted.into_iter().map(|(path,)| path).collect(),
        })
    }
}
