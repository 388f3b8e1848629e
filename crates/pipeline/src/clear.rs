//! Bulk removal of every collected attraction and its images.

use std::path::Path;

use sqlx::PgPool;
use travelguide_db::repositories::AttractionRepo;

use crate::error::PipelineError;
use crate::media::remove_media_files;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub gallery_rows: u64,
    pub attractions: u64,
    pub images: u64,
    /// Files actually deleted from the media root.
    pub files_removed: usize,
}

/// Delete all attractions, gallery rows and their images.
///
/// Rows go in one transaction; files are removed only after it commits.
pub async fn clear_attractions(pool: &PgPool, media_root: &Path) -> Result<ClearReport, PipelineError> {
    let cleared = AttractionRepo::clear_all(pool).await?;
    let files_removed = remove_media_files(media_root, &cleared.file_paths).await;

    tracing::info!(
        gallery_rows = cleared.gallery_rows,
        attractions = cleared.attractions,
        images = cleared.images,
        files_removed,
        "Cleared attractions"
    );

    Ok(ClearReport {
        gallery_rows: cleared.gallery_rows,
        attractions: cleared.attractions,
        images: cleared.images,
        files_removed,
    })
}
