//! Scraper for the travel site's city search page.
//!
//! The first search hit is a `div.search-mdd-wrap` whose inline style
//! carries the city's cover image and whose first link carries the
//! city id (`...?id=10156`).

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use scraper::{Html, Selector};

use crate::config::SourcesConfig;
use crate::error::SourceError;
use crate::http::{browser_headers, ensure_success};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

static RESULT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.search-mdd-wrap").expect("valid selector"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));
static CITY_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id=(\d+)").expect("valid regex"));
static STYLE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"url\((.*?)\)").expect("valid regex"));

/// What the search page tells us about a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityPage {
    pub city_id: String,
    /// Normalized absolute cover URL, if the result had one.
    pub cover_url: Option<String>,
}

/// Extract the first search result from a search page.
///
/// Returns `None` when the result container, its link, or the numeric id
/// is missing.
pub fn parse_search_page(html: &str) -> Option<CityPage> {
    let document = Html::parse_document(html);
    let result = document.select(&RESULT_SELECTOR).next()?;
    let link = result.select(&LINK_SELECTOR).next()?;

    let href = link.value().attr("href").unwrap_or_default();
    let city_id = CITY_ID_RE.captures(href)?.get(1)?.as_str().to_string();

    let style = result.value().attr("style").unwrap_or_default();
    let cover_url = STYLE_URL_RE
        .captures(style)
        .and_then(|c| c.get(1))
        .map(|m| normalize_cover_url(m.as_str()))
        .filter(|url| !url.is_empty());

    Some(CityPage { city_id, cover_url })
}

/// Drop the query string and surrounding quotes, and make protocol-relative
/// URLs absolute over https.
pub fn normalize_cover_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    let without_query = trimmed.split('?').next().unwrap_or_default();
    let clean = without_query.trim_matches(|c| c == '"' || c == '\'');

    if clean.is_empty() || clean.starts_with("http") {
        clean.to_string()
    } else {
        format!("https:{clean}")
    }
}

/// Client for the travel site's search page.
pub struct TravelSiteClient {
    client: reqwest::Client,
    base_url: String,
}

impl TravelSiteClient {
    pub fn new(client: reqwest::Client, config: &SourcesConfig) -> Self {
        Self {
            client,
            base_url: config.travel_site_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search page URL for a city, with the name percent-encoded.
    pub fn search_url(&self, city: &str) -> String {
        format!("{}/search/q.php?q={}", self.base_url, urlencoding::encode(city))
    }

    /// Look a city up on the travel site.
    ///
    /// Returns `None` when the page cannot be fetched or has no usable
    /// result. Both cases are logged.
    pub async fn fetch_city(&self, city: &str) -> Option<CityPage> {
        let html = match self.fetch_search_page(city).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(city, error = %e, "Travel site search request failed");
                return None;
            }
        };

        let page = parse_search_page(&html);
        match &page {
            Some(p) => tracing::debug!(city, city_id = %p.city_id, has_cover = p.cover_url.is_some(), "Parsed search result"),
            None => tracing::warn!(city, "No usable search result on travel site"),
        }
        page
    }

    async fn fetch_search_page(&self, city: &str) -> Result<String, SourceError> {
        let response = self
            .client
            .get(self.search_url(city))
            .headers(browser_headers())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        Ok(ensure_success(response).await?.text().await?)
    }
}
