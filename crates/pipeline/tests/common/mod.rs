#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;
use travelguide_core::types::DbId;
use travelguide_db::models::destination::{CreateDestination, Destination};
use travelguide_db::models::image::CreateImage;
use travelguide_db::repositories::{DestinationRepo, ImageRepo};
use travelguide_pipeline::ImageIngest;
use travelguide_sources::SourcesConfig;

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn config(base: &str) -> SourcesConfig {
    SourcesConfig {
        amap_api_key: "test-key".into(),
        amap_base_url: format!("{base}/v3/place/text"),
        travel_site_base_url: base.to_string(),
        workflow_url: format!("{base}/v1/workflow/stream_run"),
        workflow_id: "wf-1".into(),
        workflow_app_id: "app-1".into(),
        workflow_token: "test-token".into(),
        poi_page_delay: Duration::ZERO,
        city_delay: Duration::ZERO,
    }
}

pub async fn destination(pool: &PgPool, title: &str) -> Destination {
    DestinationRepo::create(
        pool,
        &CreateDestination {
            title: title.into(),
            location: title.into(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

/// Records an `images` row per call without downloading anything.
///
/// URLs containing "broken" fail.
#[derive(Clone)]
pub struct DbIngest {
    pool: PgPool,
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl DbIngest {
    pub fn new(pool: &PgPool) -> Self {
        Self {
            pool: pool.clone(),
            calls: Arc::default(),
        }
    }

    pub fn titles(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, t)| t.clone()).collect()
    }
}

#[async_trait::async_trait]
impl ImageIngest for DbIngest {
    async fn ingest(&self, url: &str, title: &str) -> Option<DbId> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((url.to_string(), title.to_string()));
            calls.len()
        };
        if url.contains("broken") {
            return None;
        }
        let image = ImageRepo::create(
            &self.pool,
            &CreateImage {
                title: title.to_string(),
                file_path: format!("original_images/{title}_{call}.jpg"),
                width: 10,
                height: 10,
                file_size_bytes: 100,
            },
        )
        .await
        .ok()?;
        Some(image.id)
    }
}

/// A solid-colour PNG of the given size.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbaImage::from_pixel(width, height, image::Rgba([30, 120, 200, 128]))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
