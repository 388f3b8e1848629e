//! Remote image download and JPEG transcoding.

use std::io::Cursor;
use std::time::Duration;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::error::SourceError;
use crate::http::{browser_headers, ensure_success};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounding box and quality for stored images.
#[derive(Debug, Clone, Copy)]
pub struct TranscodeOptions {
    /// Longest allowed side, in pixels. Larger images are scaled down.
    pub max_dimension: u32,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            max_dimension: 1200,
            jpeg_quality: 85,
        }
    }
}

/// A JPEG ready to be written to the media store.
#[derive(Debug, Clone)]
pub struct TranscodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode any supported format, flatten to RGB, fit inside the bounding
/// box preserving aspect ratio, and encode as JPEG.
///
/// Images already inside the box keep their size.
pub fn transcode(data: &[u8], options: &TranscodeOptions) -> Result<TranscodedImage, SourceError> {
    let decoded = image::load_from_memory(data)?;

    let max = options.max_dimension;
    let fitted = if decoded.width() > max || decoded.height() > max {
        decoded.resize(max, max, FilterType::Lanczos3)
    } else {
        decoded
    };

    let rgb = fitted.to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut bytes), options.jpeg_quality)
        .encode_image(&rgb)?;

    Ok(TranscodedImage {
        bytes,
        width: rgb.width(),
        height: rgb.height(),
    })
}

/// Downloads image bytes with browser-like headers.
pub struct ImageDownloader {
    client: reqwest::Client,
}

impl ImageDownloader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn download(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let response = self
            .client
            .get(url)
            .headers(browser_headers())
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await?;
        let bytes = ensure_success(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
