//! POI import: walk the category table for one city and upsert every POI
//! as an attraction of an existing destination.

use serde_json::Value;
use sqlx::PgPool;
use travelguide_core::categories::POI_CATEGORIES;
use travelguide_core::types::DbId;
use travelguide_db::repositories::{AttractionRepo, DestinationRepo};
use travelguide_sources::poi::PoiClient;
use travelguide_sources::SourcesConfig;

use crate::error::PipelineError;
use crate::mapper::map_poi_to_attraction;
use crate::media::ImageIngest;

/// Counts for one category pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryReport {
    pub code: &'static str,
    pub label: &'static str,
    pub fetched: usize,
    pub created: usize,
    pub updated: usize,
    /// Gallery rows written.
    pub images: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoiImportReport {
    pub categories: Vec<CategoryReport>,
}

impl PoiImportReport {
    pub fn created(&self) -> usize {
        self.categories.iter().map(|c| c.created).sum()
    }

    pub fn updated(&self) -> usize {
        self.categories.iter().map(|c| c.updated).sum()
    }

    pub fn images(&self) -> usize {
        self.categories.iter().map(|c| c.images).sum()
    }

    pub fn failed(&self) -> usize {
        self.categories.iter().map(|c| c.failed).sum()
    }
}

/// Result of writing one POI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoiOutcome {
    pub attraction_id: DbId,
    pub inserted: bool,
    pub gallery_rows: usize,
}

pub struct PoiImporter<I> {
    pool: PgPool,
    poi: PoiClient,
    ingest: I,
}

impl<I: ImageIngest> PoiImporter<I> {
    pub fn new(pool: PgPool, client: reqwest::Client, config: &SourcesConfig, ingest: I) -> Self {
        Self {
            pool,
            poi: PoiClient::new(client, config),
            ingest,
        }
    }

    /// Import up to `max_pages` pages of every category for `city`.
    ///
    /// Fails only when the destination does not exist; everything past
    /// that is absorbed into the report.
    pub async fn run(
        &self,
        city: &str,
        destination_id: DbId,
        max_pages: u32,
    ) -> Result<PoiImportReport, PipelineError> {
        if DestinationRepo::find_by_id(&self.pool, destination_id).await?.is_none() {
            return Err(PipelineError::DestinationNotFound(destination_id));
        }

        let mut report = PoiImportReport::default();
        for &(code, label) in POI_CATEGORIES {
            let pois = self.poi.collect_city_pois(city, &[code], max_pages).await;
            let mut category = CategoryReport {
                code,
                label,
                fetched: pois.len(),
                ..Default::default()
            };

            if pois.is_empty() {
                tracing::info!(city, code, label, "No POIs for category");
                report.categories.push(category);
                continue;
            }

            for poi in &pois {
                match self.import_poi(poi, destination_id).await {
                    Ok(outcome) => {
                        if outcome.inserted {
                            category.created += 1;
                        } else {
                            category.updated += 1;
                        }
                        category.images += outcome.gallery_rows;
                    }
                    Err(e) => {
                        let name = poi.get("name").and_then(Value::as_str).unwrap_or("?");
                        tracing::warn!(city, code, poi = name, error = %e, "Skipping POI");
                        category.failed += 1;
                    }
                }
            }

            tracing::info!(
                city,
                label,
                created = category.created,
                updated = category.updated,
                images = category.images,
                failed = category.failed,
                "Category imported"
            );
            report.categories.push(category);
        }

        tracing::info!(
            city,
            destination_id,
            created = report.created(),
            updated = report.updated(),
            images = report.images(),
            failed = report.failed(),
            "POI import finished"
        );
        Ok(report)
    }

    /// Map one POI and upsert it together with its gallery rows.
    pub async fn import_poi(&self, poi: &Value, destination_id: DbId) -> Result<PoiOutcome, PipelineError> {
        let mapped = map_poi_to_attraction(poi, destination_id, &self.ingest).await?;
        let gallery = mapped.gallery_rows();
        let upserted = AttractionRepo::upsert_with_gallery(&self.pool, &mapped.to_create(), &gallery).await?;

        Ok(PoiOutcome {
            attraction_id: upserted.attraction.id,
            inserted: upserted.inserted,
            gallery_rows: gallery.len(),
        })
    }
}
