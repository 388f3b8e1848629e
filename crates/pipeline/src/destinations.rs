//! Destination import: scrape the travel site, fetch the narrative, store
//! the cover, and write one destination per city.

use std::time::Duration;

use sqlx::PgPool;
use travelguide_core::types::DbId;
use travelguide_db::models::destination::DestinationImport;
use travelguide_db::repositories::DestinationRepo;
use travelguide_sources::narrative::NarrativeClient;
use travelguide_sources::travel_site::TravelSiteClient;
use travelguide_sources::SourcesConfig;

use crate::error::PipelineError;
use crate::mapper::map_destination;
use crate::media::ImageIngest;

/// What happened to one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityOutcome {
    Created(DbId),
    Updated(DbId),
    /// The title already exists and overwriting was not requested.
    Skipped,
    /// The travel site or the workflow returned nothing for the city.
    Unavailable,
}

/// Aggregate result of a destination import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct DestinationImporter<I> {
    pool: PgPool,
    travel_site: TravelSiteClient,
    narrative: NarrativeClient,
    ingest: I,
    city_delay: Duration,
}

impl<I: ImageIngest> DestinationImporter<I> {
    pub fn new(pool: PgPool, client: reqwest::Client, config: &SourcesConfig, ingest: I) -> Self {
        Self {
            pool,
            travel_site: TravelSiteClient::new(client.clone(), config),
            narrative: NarrativeClient::new(client, config),
            ingest,
            city_delay: config.city_delay,
        }
    }

    /// Import each city in order, pausing `city_delay` between cities.
    ///
    /// Per-city errors are logged and counted as failed.
    pub async fn run(&self, cities: &[String], overwrite: bool) -> DestinationReport {
        let mut report = DestinationReport::default();

        for (index, city) in cities.iter().enumerate() {
            if index > 0 && !self.city_delay.is_zero() {
                tokio::time::sleep(self.city_delay).await;
            }

            match self.import_city(city, overwrite).await {
                Ok(CityOutcome::Created(id)) => {
                    tracing::info!(city = %city, destination_id = id, "Destination created");
                    report.created += 1;
                }
                Ok(CityOutcome::Updated(id)) => {
                    tracing::info!(city = %city, destination_id = id, "Destination updated");
                    report.updated += 1;
                }
                Ok(CityOutcome::Skipped) => {
                    tracing::info!(city = %city, "Destination exists, skipped");
                    report.skipped += 1;
                }
                Ok(CityOutcome::Unavailable) => {
                    tracing::warn!(city = %city, "No source data for city");
                    report.failed += 1;
                }
                Err(e) => {
                    tracing::error!(city = %city, error = %e, "Destination import failed");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            created = report.created,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            "Destination import finished"
        );
        report
    }

    /// Import a single city: scrape, narrative, cover, then write.
    pub async fn import_city(&self, city: &str, overwrite: bool) -> Result<CityOutcome, PipelineError> {
        let Some(page) = self.travel_site.fetch_city(city).await else {
            return Ok(CityOutcome::Unavailable);
        };
        tracing::debug!(city, city_id = %page.city_id, "Scraped travel site");

        let Some(narrative) = self.narrative.fetch(city).await else {
            return Ok(CityOutcome::Unavailable);
        };

        if !overwrite && DestinationRepo::find_by_title(&self.pool, city).await?.is_some() {
            return Ok(CityOutcome::Skipped);
        }

        let cover_image_id = match &page.cover_url {
            Some(url) => self.ingest.ingest(url, &format!("{city}_cover")).await,
            None => None,
        };

        let mapped = map_destination(city, narrative, cover_image_id);
        let outcome = match DestinationRepo::import(&self.pool, &mapped.to_create(), overwrite).await? {
            DestinationImport::Created(d) => CityOutcome::Created(d.id),
            DestinationImport::Updated(d) => CityOutcome::Updated(d.id),
            DestinationImport::Skipped => CityOutcome::Skipped,
        };
        Ok(outcome)
    }
}
