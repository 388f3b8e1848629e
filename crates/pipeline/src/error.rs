use travelguide_core::error::CoreError;
use travelguide_core::types::DbId;
use travelguide_sources::SourceError;

/// Errors from the collector pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Source(#[from] SourceError),

    /// A source record could not be mapped; only that record is skipped.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Media I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Destination {0} does not exist")]
    DestinationNotFound(DbId),
}
