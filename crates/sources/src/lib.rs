//! Adapters for the third-party services the collector reads from.
//!
//! - [`poi`]: paginated POI search on the map provider
//! - [`travel_site`]: HTML search page scrape for a city's id and cover
//! - [`narrative`]: workflow API streamed over SSE-style `data:` lines
//! - [`image`]: download and JPEG transcoding of remote images
//!
//! Every adapter takes its endpoints from [`config::SourcesConfig`] and
//! shares one [`reqwest::Client`] built by [`http::build_client`].

pub mod config;
pub mod error;
pub mod http;
pub mod image;
pub mod lenient;
pub mod narrative;
pub mod poi;
pub mod travel_site;

pub use config::SourcesConfig;
pub use error::SourceError;
