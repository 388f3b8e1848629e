//! Image ingestion: download, normalize to a bounded RGB JPEG, write under
//! the media root, and record an `images` row.

use std::path::{Path, PathBuf};

use sqlx::PgPool;
use travelguide_core::types::DbId;
use travelguide_db::models::image::{CreateImage, Image};
use travelguide_db::repositories::ImageRepo;
use travelguide_sources::image::{transcode, ImageDownloader, TranscodeOptions};
use uuid::Uuid;

use crate::error::PipelineError;

/// Subdirectory of the media root that holds ingested images.
pub const ORIGINALS_DIR: &str = "original_images";

/// Longest sanitized title kept in a generated file name, in characters.
const MAX_FILE_STEM_CHARS: usize = 50;

/// Turns a remote image URL into a stored image row.
///
/// Implementations never fail the caller: any download, decode or write
/// problem is logged and reported as `None`.
#[async_trait::async_trait]
pub trait ImageIngest: Send + Sync {
    async fn ingest(&self, url: &str, title: &str) -> Option<DbId>;
}

/// Media storage settings.
///
/// | Variable              | Default |
/// |-----------------------|---------|
/// | `MEDIA_ROOT`          | `media` |
/// | `IMAGE_MAX_DIMENSION` | `1200`  |
/// | `IMAGE_JPEG_QUALITY`  | `85`    |
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub media_root: PathBuf,
    pub transcode: TranscodeOptions,
}

impl MediaConfig {
    pub fn from_env() -> Self {
        let media_root = std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".into());

        let max_dimension: u32 = std::env::var("IMAGE_MAX_DIMENSION")
            .unwrap_or_else(|_| "1200".into())
            .parse()
            .expect("IMAGE_MAX_DIMENSION must be a valid u32");

        let jpeg_quality: u8 = std::env::var("IMAGE_JPEG_QUALITY")
            .unwrap_or_else(|_| "85".into())
            .parse()
            .expect("IMAGE_JPEG_QUALITY must be a valid u8");

        Self {
            media_root: PathBuf::from(media_root),
            transcode: TranscodeOptions {
                max_dimension,
                jpeg_quality,
            },
        }
    }
}

/// [`ImageIngest`] backed by the local filesystem and the `images` table.
pub struct MediaStore {
    pool: PgPool,
    downloader: ImageDownloader,
    config: MediaConfig,
}

impl MediaStore {
    pub fn new(pool: PgPool, client: reqwest::Client, config: MediaConfig) -> Self {
        Self {
            pool,
            downloader: ImageDownloader::new(client),
            config,
        }
    }

    /// Download, transcode and persist one image.
    ///
    /// The written file is removed again if the row insert fails.
    pub async fn store(&self, url: &str, title: &str) -> Result<Image, PipelineError> {
        let raw = self.downloader.download(url).await?;
        let encoded = transcode(&raw, &self.config.transcode)?;

        let relative = format!("{ORIGINALS_DIR}/{}", file_name_for(title));
        let absolute = self.config.media_root.join(&relative);
        if let Some(parent) = absolute.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&absolute, &encoded.bytes).await?;

        let input = CreateImage {
            title: title.to_string(),
            file_path: relative,
            width: encoded.width as i32,
            height: encoded.height as i32,
            file_size_bytes: encoded.bytes.len() as i64,
        };
        match ImageRepo::create(&self.pool, &input).await {
            Ok(image) => Ok(image),
            Err(e) => {
                if let Err(io) = tokio::fs::remove_file(&absolute).await {
                    tracing::warn!(path = %absolute.display(), error = %io, "Failed to remove orphaned image file");
                }
                Err(e.into())
            }
        }
    }
}

#[async_trait::async_trait]
impl ImageIngest for MediaStore {
    async fn ingest(&self, url: &str, title: &str) -> Option<DbId> {
        match self.store(url, title).await {
            Ok(image) => {
                tracing::debug!(image_id = image.id, url, path = %image.file_path, "Stored image");
                Some(image.id)
            }
            Err(e) => {
                tracing::warn!(url, title, error = %e, "Image ingestion failed");
                None
            }
        }
    }
}

/// Build a unique `.jpg` file name from an image title.
fn file_name_for(title: &str) -> String {
    format!("{}_{}.jpg", sanitize_stem(title), Uuid::now_v7().simple())
}

/// Keep letters, digits, `-` and `_`; everything else becomes `_`.
fn sanitize_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .take(MAX_FILE_STEM_CHARS)
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "image".to_string()
    } else {
        stem
    }
}

/// Delete media files by their root-relative paths.
///
/// Best effort: missing files are ignored and other failures are logged.
/// Returns how many files were actually removed.
pub async fn remove_media_files(media_root: &Path, paths: &[String]) -> usize {
    let mut removed = 0;
    for path in paths {
        let absolute = media_root.join(path);
        match tokio::fs::remove_file(&absolute).await {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %absolute.display(), "Media file already gone");
            }
            Err(e) => {
                tracing::warn!(path = %absolute.display(), error = %e, "Failed to remove media file");
            }
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_keeps_cjk_and_replaces_separators() {
        assert_eq!(sanitize_stem("西湖 景区/1"), "西湖_景区_1");
        assert_eq!(sanitize_stem("Test Park_2"), "Test_Park_2");
    }

    #[test]
    fn empty_title_gets_placeholder_stem() {
        assert_eq!(sanitize_stem("   "), "image");
    }

    #[test]
    fn long_titles_are_truncated() {
        let title = "a".repeat(200);
        assert_eq!(sanitize_stem(&title).chars().count(), MAX_FILE_STEM_CHARS);
    }

    #[test]
    fn generated_names_are_unique_jpegs() {
        let a = file_name_for("Hangzhou_cover");
        let b = file_name_for("Hangzhou_cover");
        assert_ne!(a, b);
        assert!(a.starts_with("Hangzhou_cover_"));
        assert!(a.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn removing_files_ignores_missing_ones() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(ORIGINALS_DIR)).unwrap();
        std::fs::write(dir.path().join("original_images/a.jpg"), b"x").unwrap();

        let removed = remove_media_files(
            dir.path(),
            &["original_images/a.jpg".to_string(), "original_images/missing.jpg".to_string()],
        )
        .await;

        assert_eq!(removed, 1);
        assert!(!dir.path().join("original_images/a.jpg").exists());
    }
}
