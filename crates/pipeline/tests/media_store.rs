//! Image ingestion into a temporary media root, and the bulk clear.

mod common;

use axum::routing::get;
use axum::Router;
use sqlx::PgPool;
use travelguide_db::models::attraction::CreateAttraction;
use travelguide_db::models::image::CreateAttractionImage;
use travelguide_db::repositories::{AttractionRepo, ImageRepo};
use travelguide_pipeline::clear::{clear_attractions, ClearReport};
use travelguide_pipeline::{ImageIngest, MediaConfig, MediaStore};
use travelguide_sources::image::TranscodeOptions;

use common::{destination, png, spawn};

async fn image_server() -> String {
    let big = png(2400, 1600);
    let small = png(300, 200);
    let app = Router::new()
        .route("/big.png", get(move || {
            let big = big.clone();
            async move { big }
        }))
        .route("/small.png", get(move || {
            let small = small.clone();
            async move { small }
        }))
        .route("/garbage.png", get(|| async { "not an image" }));
    spawn(app).await
}

fn store(pool: &PgPool, root: &std::path::Path) -> MediaStore {
    MediaStore::new(
        pool.clone(),
        reqwest::Client::new(),
        MediaConfig {
            media_root: root.to_path_buf(),
            transcode: TranscodeOptions::default(),
        },
    )
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stored_image_is_bounded_jpeg_on_disk(pool: PgPool) {
    let base = image_server().await;
    let root = tempfile::tempdir().unwrap();
    let store = store(&pool, root.path());

    let image = store.store(&format!("{base}/big.png"), "西湖_1").await.unwrap();
    assert_eq!((image.width, image.height), (1200, 800));
    assert!(image.file_path.starts_with("original_images/西湖_1_"));
    assert!(image.file_path.ends_with(".jpg"));

    let bytes = std::fs::read(root.path().join(&image.file_path)).unwrap();
    assert_eq!(bytes.len() as i64, image.file_size_bytes);
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn small_image_is_not_upscaled(pool: PgPool) {
    let base = image_server().await;
    let root = tempfile::tempdir().unwrap();

    let image = store(&pool, root.path()).store(&format!("{base}/small.png"), "small").await.unwrap();
    assert_eq!((image.width, image.height), (300, 200));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_ingest_leaves_no_row_and_no_file(pool: PgPool) {
    let base = image_server().await;
    let root = tempfile::tempdir().unwrap();
    let store = store(&pool, root.path());

    assert_eq!(store.ingest(&format!("{base}/missing.png"), "gone").await, None);
    assert_eq!(store.ingest(&format!("{base}/garbage.png"), "junk").await, None);
    assert_eq!(ImageRepo::count(&pool).await.unwrap(), 0);
    assert!(!root.path().join("original_images").exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn clear_removes_rows_then_files(pool: PgPool) {
    let base = image_server().await;
    let root = tempfile::tempdir().unwrap();
    let store = store(&pool, root.path());
    let dest = destination(&pool, "杭州").await;

    let cover = store.ingest(&format!("{base}/small.png"), "Lake_1").await.unwrap();
    let extra = store.ingest(&format!("{base}/small.png"), "Lake_2").await.unwrap();
    AttractionRepo::upsert_with_gallery(
        &pool,
        &CreateAttraction {
            name: "Lake".into(),
            destination_id: dest.id,
            cover_image_id: Some(cover),
            location: "Lake".into(),
            ..Default::default()
        },
        &[CreateAttractionImage {
            image_id: extra,
            title: "Lake_2".into(),
            description: String::new(),
            sort_order: 1,
        }],
    )
    .await
    .unwrap();

    let report = clear_attractions(&pool, root.path()).await.unwrap();
    assert_eq!(
        report,
        ClearReport {
            gallery_rows: 1,
            attractions: 1,
            images: 2,
            files_removed: 2,
        }
    );
    assert_eq!(ImageRepo::count(&pool).await.unwrap(), 0);
    let left = std::fs::read_dir(root.path().join("original_images")).unwrap().count();
    assert_eq!(left, 0);
}
