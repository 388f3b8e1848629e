use std::time::Duration;

/// Endpoints, credentials, and pacing for the external sources.
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    /// Map provider API key sent as the `key` query parameter.
    pub amap_api_key: String,
    /// POI text-search endpoint.
    pub amap_base_url: String,
    /// Travel site origin; the search page lives at `/search/q.php`.
    pub travel_site_base_url: String,
    /// Streaming workflow run endpoint.
    pub workflow_url: String,
    pub workflow_id: String,
    pub workflow_app_id: String,
    /// Bearer token for the workflow API.
    pub workflow_token: String,
    /// Pause between consecutive POI page requests.
    pub poi_page_delay: Duration,
    /// Pause between destination imports.
    pub city_delay: Duration,
}

impl SourcesConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                        |
    /// |------------------------|------------------------------------------------|
    /// | `AMAP_API_KEY`         | empty                                          |
    /// | `AMAP_BASE_URL`        | `https://restapi.amap.com/v3/place/text`       |
    /// | `TRAVEL_SITE_BASE_URL` | `https://www.mafengwo.cn`                      |
    /// | `WORKFLOW_URL`         | `https://api.coze.cn/v1/workflow/stream_run`   |
    /// | `WORKFLOW_ID`          | empty                                          |
    /// | `WORKFLOW_APP_ID`      | empty                                          |
    /// | `WORKFLOW_TOKEN`       | empty                                          |
    /// | `POI_PAGE_DELAY_MS`    | `500`                                          |
    /// | `CITY_DELAY_MS`        | `2000`                                         |
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| default.to_string())
        };

        let poi_page_delay_ms: u64 = var("POI_PAGE_DELAY_MS", "500")
            .parse()
            .expect("POI_PAGE_DELAY_MS must be a valid u64");
        let city_delay_ms: u64 = var("CITY_DELAY_MS", "2000")
            .parse()
            .expect("CITY_DELAY_MS must be a valid u64");

        let config = Self {
            amap_api_key: var("AMAP_API_KEY", ""),
            amap_base_url: var("AMAP_BASE_URL", "https://restapi.amap.com/v3/place/text"),
            travel_site_base_url: var("TRAVEL_SITE_BASE_URL", "https://www.mafengwo.cn"),
            workflow_url: var("WORKFLOW_URL", "https://api.coze.cn/v1/workflow/stream_run"),
            workflow_id: var("WORKFLOW_ID", ""),
            workflow_app_id: var("WORKFLOW_APP_ID", ""),
            workflow_token: var("WORKFLOW_TOKEN", ""),
            poi_page_delay: Duration::from_millis(poi_page_delay_ms),
            city_delay: Duration::from_millis(city_delay_ms),
        };

        if config.amap_api_key.is_empty() {
            tracing::warn!("AMAP_API_KEY is not set; POI requests will be rejected upstream");
        }
        if config.workflow_token.is_empty() {
            tracing::warn!("WORKFLOW_TOKEN is not set; narrative requests will be rejected upstream");
        }

        config
    }
}
