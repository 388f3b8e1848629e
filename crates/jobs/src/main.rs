//! Batch entry points for the content collector.
//!
//! ```text
//! travelguide-jobs destinations 杭州 苏州 [--update]
//! travelguide-jobs pois 杭州 --destination-id 1 [--max-pages 3]
//! travelguide-jobs clear-attractions [--force]
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travelguide_core::types::DbId;
use travelguide_db::DbPool;
use travelguide_pipeline::clear::clear_attractions;
use travelguide_pipeline::destinations::DestinationImporter;
use travelguide_pipeline::pois::PoiImporter;
use travelguide_pipeline::{MediaConfig, MediaStore};
use travelguide_sources::SourcesConfig;

#[derive(Parser, Debug)]
#[command(name = "travelguide-jobs", version, about = "Collect destinations and attractions from third-party sources")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import one destination per city from the travel site and the narrative workflow
    Destinations {
        #[arg(required = true)]
        cities: Vec<String>,
        /// Overwrite destinations that already exist instead of skipping them
        #[arg(long)]
        update: bool,
    },
    /// Import every POI category of a city as attractions of an existing destination
    Pois {
        city: String,
        #[arg(long)]
        destination_id: DbId,
        /// Pages fetched per category
        #[arg(long, default_value_t = 3)]
        max_pages: u32,
    },
    /// Delete all attractions, their gallery rows, images and files
    ClearAttractions {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "travelguide_jobs=info,travelguide_pipeline=info,travelguide_sources=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = travelguide_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    travelguide_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    match cli.command {
        Command::Destinations { cities, update } => import_destinations(pool, &cities, update).await,
        Command::Pois {
            city,
            destination_id,
            max_pages,
        } => import_pois(pool, &city, destination_id, max_pages).await,
        Command::ClearAttractions { force } => clear(pool, force).await,
    }
}

fn media_store(pool: &DbPool, client: &reqwest::Client) -> MediaStore {
    MediaStore::new(pool.clone(), client.clone(), MediaConfig::from_env())
}

async fn import_destinations(pool: DbPool, cities: &[String], update: bool) -> Result<()> {
    let client = travelguide_sources::http::build_client()?;
    let sources = SourcesConfig::from_env();
    let ingest = media_store(&pool, &client);
    let importer = DestinationImporter::new(pool, client, &sources, ingest);

    let report = importer.run(cities, update).await;
    println!(
        "Destinations: {} created, {} updated, {} skipped, {} failed",
        report.created, report.updated, report.skipped, report.failed
    );
    Ok(())
}

async fn import_pois(pool: DbPool, city: &str, destination_id: DbId, max_pages: u32) -> Result<()> {
    let client = travelguide_sources::http::build_client()?;
    let sources = SourcesConfig::from_env();
    let ingest = media_store(&pool, &client);
    let importer = PoiImporter::new(pool, client, &sources, ingest);

    let report = importer
        .run(city, destination_id, max_pages)
        .await
        .with_context(|| format!("POI import for {city} failed"))?;

    for category in &report.categories {
        println!(
            "{} ({}): {} fetched, {} created, {} updated, {} images, {} failed",
            category.label,
            category.code,
            category.fetched,
            category.created,
            category.updated,
            category.images,
            category.failed
        );
    }
    println!(
        "Total: {} created, {} updated, {} images, {} failed",
        report.created(),
        report.updated(),
        report.images(),
        report.failed()
    );
    Ok(())
}

async fn clear(pool: DbPool, force: bool) -> Result<()> {
    if !force {
        let prompt = "This deletes every attraction, its gallery and image files. Continue? [y/N] ";
        if !confirm(prompt, io::stdin().lock(), io::stdout())? {
            println!("Aborted");
            return Ok(());
        }
    }

    let media = MediaConfig::from_env();
    let report = clear_attractions(&pool, &media.media_root).await?;
    println!(
        "Removed {} gallery rows, {} attractions, {} images, {} files",
        report.gallery_rows, report.attractions, report.images, report.files_removed
    );
    Ok(())
}

/// Ask a yes/no question; only `y` or `yes` (any case) confirms.
fn confirm(prompt: &str, mut input: impl BufRead, mut output: impl Write) -> io::Result<bool> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pois_defaults_to_three_pages() {
        let cli = Cli::parse_from(["travelguide-jobs", "pois", "杭州", "--destination-id", "7"]);
        match cli.command {
            Command::Pois {
                city,
                destination_id,
                max_pages,
            } => {
                assert_eq!(city, "杭州");
                assert_eq!(destination_id, 7);
                assert_eq!(max_pages, 3);
            }
            other => panic!("Expected pois, got {other:?}"),
        }
    }

    #[test]
    fn destinations_requires_a_city() {
        assert!(Cli::try_parse_from(["travelguide-jobs", "destinations"]).is_err());
    }

    #[test]
    fn confirmation_accepts_only_yes() {
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false), ("yep\n", false)] {
            let mut out = Vec::new();
            assert_eq!(confirm("?", answer.as_bytes(), &mut out).unwrap(), expected, "{answer:?}");
            assert_eq!(out, b"?");
        }
    }
}
