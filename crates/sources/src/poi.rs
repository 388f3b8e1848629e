//! Paginated POI search against the map provider's text-search API.
//!
//! Records are returned as raw JSON objects; typing and validation
//! happen in the record mapper.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::config::SourcesConfig;
use crate::error::SourceError;
use crate::http::ensure_success;

/// Records requested per page.
pub const PAGE_SIZE: u32 = 20;

/// Envelope of a text-search response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    info: Option<String>,
    #[serde(default)]
    pois: Vec<Value>,
}

/// Client for the POI text-search endpoint.
pub struct PoiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    page_delay: Duration,
}

impl PoiClient {
    pub fn new(client: reqwest::Client, config: &SourcesConfig) -> Self {
        Self {
            client,
            base_url: config.amap_base_url.clone(),
            api_key: config.amap_api_key.clone(),
            page_delay: config.poi_page_delay,
        }
    }

    /// Fetch one page of POIs for a city restricted to `type_codes`.
    ///
    /// Returns `None` when the API reports a failure status, the page is
    /// empty, or the request fails. Failures are logged, never retried.
    pub async fn fetch_page(&self, city: &str, type_codes: &[&str], page: u32) -> Option<Vec<Value>> {
        match self.request_page(city, type_codes, page).await {
            Ok(pois) => pois,
            Err(e) => {
                tracing::warn!(city, page, error = %e, "POI page request failed");
                None
            }
        }
    }

    /// Collect pages `1..=max_pages`, stopping at the first empty page.
    ///
    /// Sleeps the configured page delay between consecutive requests.
    pub async fn collect_city_pois(
        &self,
        city: &str,
        type_codes: &[&str],
        max_pages: u32,
    ) -> Vec<Value> {
        let mut all = Vec::new();

        for page in 1..=max_pages {
            if page > 1 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
            let Some(pois) = self.fetch_page(city, type_codes, page).await else {
                break;
            };
            tracing::debug!(city, page, count = pois.len(), "Fetched POI page");
            all.extend(pois);
        }

        all
    }

    async fn request_page(
        &self,
        city: &str,
        type_codes: &[&str],
        page: u32,
    ) -> Result<Option<Vec<Value>>, SourceError> {
        let types = type_codes.join("|");
        let offset = PAGE_SIZE.to_string();
        let page_param = page.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("city", city),
                ("types", types.as_str()),
                ("citylimit", "true"),
                ("output", "json"),
                ("offset", offset.as_str()),
                ("page", page_param.as_str()),
                ("extensions", "all"),
            ])
            .send()
            .await?;

        let body: SearchResponse = ensure_success(response).await?.json().await?;
        if body.status != "1" {
            tracing::warn!(
                city,
                page,
                info = body.info.as_deref().unwrap_or(""),
                "POI API reported failure"
            );
            return Ok(None);
        }
        if body.pois.is_empty() {
            return Ok(None);
        }
        Ok(Some(body.pois))
    }
}
