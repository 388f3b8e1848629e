//! Collector ETL: maps source records to rows, ingests images, and runs
//! the three batch jobs (destination import, POI import, attraction clear).
//!
//! Jobs run strictly sequentially. Per-unit failures are logged and
//! counted in the job report; they never abort the batch.

pub mod clear;
pub mod destinations;
pub mod error;
pub mod mapper;
pub mod media;
pub mod pois;

pub use error::PipelineError;
pub use media::{ImageIngest, MediaConfig, MediaStore};
