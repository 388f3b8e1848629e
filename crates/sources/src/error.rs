/// Errors from the external source adapters.
///
/// Adapters log these and report "no data" to the pipeline; nothing
/// upstream retries.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream service returned a non-2xx status code.
    #[error("Upstream error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Re-decoded stream content was not valid UTF-8.
    #[error("Content is not valid UTF-8 after re-decoding: {0}")]
    Redecode(#[from] std::string::FromUtf8Error),

    /// A stream event did not have the expected shape.
    #[error("Malformed stream event: {0}")]
    MalformedEvent(String),

    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
}
