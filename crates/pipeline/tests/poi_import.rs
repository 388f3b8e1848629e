//! POI import against a fake map provider.

mod common;

use std::collections::HashMap;

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use sqlx::PgPool;
use travelguide_db::repositories::AttractionRepo;
use travelguide_pipeline::pois::PoiImporter;
use travelguide_pipeline::PipelineError;

use common::{config, destination, spawn, DbIngest};

/// Parks return one page with a good and a bad POI; every other category is empty.
fn fake_map_provider() -> Router {
    Router::new().route(
        "/v3/place/text",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let pois = if params["types"] == "110101" && params["page"] == "1" {
                vec![
                    json!({
                        "name": "Test Park",
                        "location": "116.4,39.9",
                        "typecode": "110101",
                        "address": [],
                        "photos": [{"url": "http://img/u1"}, {"url": "http://img/u2"}],
                        "biz_ext": {"rating": "4.5"}
                    }),
                    json!({"name": "Lost Place", "location": "[]", "typecode": "110101"}),
                ]
            } else {
                Vec::<Value>::new()
            };
            Json(json!({"status": "1", "count": pois.len().to_string(), "pois": pois}))
        }),
    )
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn importing_twice_keeps_attraction_count_and_appends_gallery(pool: PgPool) {
    let base = spawn(fake_map_provider()).await;
    let dest = destination(&pool, "北京").await;
    let ingest = DbIngest::new(&pool);
    let importer = PoiImporter::new(pool.clone(), reqwest::Client::new(), &config(&base), ingest.clone());

    let first = importer.run("北京", dest.id, 2).await.unwrap();
    assert_eq!(first.created(), 1);
    assert_eq!(first.updated(), 0);
    assert_eq!(first.images(), 1);
    assert_eq!(first.failed(), 1);

    let parks = first.categories.iter().find(|c| c.code == "110101").unwrap();
    assert_eq!(parks.fetched, 2);

    let second = importer.run("北京", dest.id, 2).await.unwrap();
    assert_eq!(second.created(), 0);
    assert_eq!(second.updated(), 1);

    assert_eq!(AttractionRepo::count_by_destination(&pool, dest.id).await.unwrap(), 1);
    let park = &AttractionRepo::list_by_destination(&pool, dest.id).await.unwrap()[0];
    assert_eq!(park.category, "公园");
    assert_eq!(park.rating, 4.5);
    assert_eq!(park.latitude, Some(39.9));
    assert_eq!(AttractionRepo::count_gallery(&pool, park.id).await.unwrap(), 2);

    assert_eq!(ingest.titles(), vec!["Test Park_1", "Test Park_2", "Test Park_1", "Test Park_2"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_category_is_reported_in_table_order(pool: PgPool) {
    let base = spawn(fake_map_provider()).await;
    let dest = destination(&pool, "上海").await;
    let importer = PoiImporter::new(pool.clone(), reqwest::Client::new(), &config(&base), DbIngest::new(&pool));

    let report = importer.run("上海", dest.id, 1).await.unwrap();
    let codes: Vec<_> = report.categories.iter().map(|c| c.code).collect();
    let expected: Vec<_> = travelguide_core::categories::POI_CATEGORIES.iter().map(|(c, _)| *c).collect();
    assert_eq!(codes, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_destination_is_rejected_before_fetching(pool: PgPool) {
    let importer = PoiImporter::new(
        pool.clone(),
        reqwest::Client::new(),
        &config("http://127.0.0.1:9"),
        DbIngest::new(&pool),
    );

    let err = importer.run("北京", 999_999, 1).await.unwrap_err();
    assert!(matches!(err, PipelineError::DestinationNotFound(999_999)));
}
