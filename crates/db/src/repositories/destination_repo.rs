//! Repository for the `destinations` table.

use sqlx::{PgExecutor, PgPool};
use travelguide_core::types::DbId;

use crate::models::destination::{
    CreateDestination, Destination, DestinationImport, UpdateDestination,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, title, description, long_description, cover_image_id, location, \
    province, country, latitude, longitude, category, best_season, \
    views_count, rating, created_at, updated_at";

/// Number of destinations returned by [`DestinationRepo::popular`].
const POPULAR_LIMIT: i64 = 3;

/// Provides CRUD operations for destinations.
pub struct DestinationRepo;

impl DestinationRepo {
    /// Insert a new destination, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDestination,
    ) -> Result<Destination, sqlx::Error> {
        insert(pool, input).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Destination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM destinations WHERE id = $1");
        sqlx::query_as::<_, Destination>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_title(
        pool: &PgPool,
        title: &str,
    ) -> Result<Option<Destination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM destinations WHERE title = $1");
        sqlx::query_as::<_, Destination>(&query)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// List all destinations, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Destination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM destinations ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Destination>(&query)
            .fetch_all(pool)
            .await
    }

    /// The most viewed destinations.
    pub async fn popular(pool: &PgPool) -> Result<Vec<Destination>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM destinations ORDER BY views_count DESC, id LIMIT $1"
        );
        sqlx::query_as::<_, Destination>(&query)
            .bind(POPULAR_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Bump the view counter and return the updated row.
    pub async fn record_view(pool: &PgPool, id: DbId) -> Result<Option<Destination>, sqlx::Error> {
        let query = format!(
            "UPDATE destinations SET views_count = views_count + 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Destination>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a destination. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDestination,
    ) -> Result<Option<Destination>, sqlx::Error> {
        let query = format!(
            "UPDATE destinations SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                long_description = COALESCE($4, long_description),
                cover_image_id = COALESCE($5, cover_image_id),
                location = COALESCE($6, location),
                province = COALESCE($7, province),
                country = COALESCE($8, country),
                latitude = COALESCE($9, latitude),
                longitude = COALESCE($10, longitude),
                category = COALESCE($11, category),
                best_season = COALESCE($12, best_season),
                rating = COALESCE($13, rating)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Destination>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.long_description)
            .bind(input.cover_image_id)
            .bind(&input.location)
            .bind(&input.province)
            .bind(&input.country)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.category)
            .bind(&input.best_season)
            .bind(input.rating)
            .fetch_optional(pool)
            .await
    }

    /// Delete a destination by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Write an imported destination keyed by title, in one transaction.
    ///
    /// With `overwrite`, an existing row has every imported field replaced
    /// (the cover only when a new one is supplied; `views_count` is kept).
    /// Without it, an existing title yields [`DestinationImport::Skipped`].
    pub async fn import(
        pool: &PgPool,
        input: &CreateDestination,
        overwrite: bool,
    ) -> Result<DestinationImport, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM destinations WHERE title = $1 FOR UPDATE")
                .bind(&input.title)
                .fetch_optional(&mut *tx)
                .await?;

        let outcome = match existing {
            None => DestinationImport::Created(insert(&mut *tx, input).await?),
            Some(_) if !overwrite => DestinationImport::Skipped,
            Some((id,)) => {
                let query = format!(
                    "UPDATE destinations SET
                        description = COALESCE($2, ''),
                        long_description = COALESCE($3, ''),
                        cover_image_id = COALESCE($4, cover_image_id),
                        location = $5,
                        province = COALESCE($6, ''),
                        country = COALESCE($7, '中国'),
                        latitude = $8,
                        longitude = $9,
                        category = COALESCE($10, '城市'),
                        best_season = COALESCE($11, ''),
                        rating = COALESCE($12, 5.0)
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                let row = sqlx::query_as::<_, Destination>(&query)
                    .bind(id)
                    .bind(&input.description)
                    .bind(&input.long_description)
                    .bind(input.cover_image_id)
                    .bind(&input.location)
                    .bind(&input.province)
                    .bind(&input.country)
                    .bind(input.latitude)
                    .bind(input.longitude)
                    .bind(&input.category)
                    .bind(&input.best_season)
                    .bind(input.rating)
                    .fetch_one(&mut *tx)
                    .await?;
                DestinationImport::Updated(row)
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }
}

async fn insert<'e, E>(executor: E, input: &CreateDestination) -> Result<Destination, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        "INSERT INTO destinations
            (title, description, long_description, cover_image_id, location, province,
             country, latitude, longitude, category, best_season, rating)
         VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), $4, $5, COALESCE($6, ''),
                 COALESCE($7, '中国'), $8, $9, COALESCE($10, '城市'), COALESCE($11, ''),
                 COALESCE($12, 5.0))
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, Destination>(&query)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.long_description)
        .bind(input.cover_image_id)
        .bind(&input.location)
        .bind(&input.province)
        .bind(&input.country)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.category)
        .bind(&input.best_season)
        .bind(input.rating)
        .fetch_one(executor)
        .await
}
