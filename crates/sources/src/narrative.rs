//! Fetcher for destination narratives produced by a streaming workflow API.
//!
//! The workflow streams SSE-style lines. Each `data: ` line holds a JSON
//! event; an event's `content` string carries the workflow output, itself
//! JSON, but mis-decoded upstream: its UTF-8 bytes arrive as one char per
//! byte. [`redecode_content`] undoes that before the second parse.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::config::SourcesConfig;
use crate::error::SourceError;
use crate::http::ensure_success;
use crate::lenient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix of a stream line carrying an event.
const DATA_PREFIX: &str = "data: ";

fn default_country() -> String {
    "中国".to_string()
}

/// Typed workflow output for one city.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NarrativeData {
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub long_description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub province: String,
    #[serde(default = "default_country", deserialize_with = "lenient::string")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub best_season: String,
}

/// Re-decode a string whose chars are really UTF-8 bytes.
///
/// Chars below U+0100 become the byte of the same value. Any other char
/// is written as an ASCII `\uXXXX` JSON escape (a surrogate pair for
/// chars outside the BMP), so text that was already decoded survives the
/// later JSON parse. The resulting bytes must be valid UTF-8.
pub fn redecode_content(content: &str) -> Result<String, SourceError> {
    let mut bytes = Vec::with_capacity(content.len());
    for c in content.chars() {
        let code = u32::from(c);
        if code < 0x100 {
            bytes.push(code as u8);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                bytes.extend_from_slice(format!("\\u{unit:04x}").as_bytes());
            }
        }
    }
    Ok(String::from_utf8(bytes)?)
}

/// Find the workflow `result` in a streamed response body.
///
/// Lines without the `data: ` prefix are ignored and malformed events are
/// skipped. The first event whose decoded `content` carries a `result` key
/// wins.
pub fn parse_stream(body: &str) -> Option<Value> {
    for line in body.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(data) = line.strip_prefix(DATA_PREFIX) else {
            continue;
        };
        match decode_event(data) {
            Ok(Some(result)) => return Some(result),
            Ok(None) => {}
            Err(e) => tracing::debug!(error = %e, "Skipping malformed stream event"),
        }
    }
    None
}

/// Decode one event's `content` string and return its `result`, if any.
///
/// Keys outside `content` are never consulted.
fn decode_event(data: &str) -> Result<Option<Value>, SourceError> {
    let event: Value = serde_json::from_str(data)?;
    let content = match event.get("content") {
        None => return Ok(None),
        Some(Value::String(content)) => content,
        Some(other) => {
            return Err(SourceError::MalformedEvent(format!(
                "content is not a string: {other}"
            )))
        }
    };
    let payload: Value = serde_json::from_str(&redecode_content(content)?)?;
    Ok(payload.get("result").cloned())
}

/// Client for the streaming workflow endpoint.
pub struct NarrativeClient {
    client: reqwest::Client,
    url: String,
    workflow_id: String,
    app_id: String,
    token: String,
}

impl NarrativeClient {
    pub fn new(client: reqwest::Client, config: &SourcesConfig) -> Self {
        Self {
            client,
            url: config.workflow_url.clone(),
            workflow_id: config.workflow_id.clone(),
            app_id: config.workflow_app_id.clone(),
            token: config.workflow_token.clone(),
        }
    }

    /// Run the workflow for a city and return its typed output.
    ///
    /// Returns `None` when the request fails, the stream has no result, or
    /// the result does not fit [`NarrativeData`]. Each case is logged.
    pub async fn fetch(&self, city: &str) -> Option<NarrativeData> {
        let body = match self.run_workflow(city).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(city, error = %e, "Workflow request failed");
                return None;
            }
        };

        let Some(result) = parse_stream(&body) else {
            tracing::warn!(city, "Workflow stream carried no result");
            return None;
        };

        match serde_json::from_value::<NarrativeData>(result) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!(city, error = %e, "Workflow result has an unexpected shape");
                None
            }
        }
    }

    async fn run_workflow(&self, city: &str) -> Result<String, SourceError> {
        let payload = serde_json::json!({
            "workflow_id": self.workflow_id,
            "parameters": { "city": city },
            "app_id": self.app_id,
        });

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&payload)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        Ok(ensure_success(response).await?.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Simulate the upstream bug: UTF-8 bytes read back one char per byte.
    fn mojibake(text: &str) -> String {
        text.bytes().map(char::from).collect()
    }

    fn event_line(content: &str) -> String {
        format!("data: {}", serde_json::json!({ "content": content }))
    }

    #[test]
    fn redecode_restores_mis_decoded_utf8() {
        assert_eq!(redecode_content(&mojibake("杭州")).unwrap(), "杭州");
    }

    #[test]
    fn redecode_escapes_already_decoded_text() {
        let decoded = redecode_content(r#"{"province":"浙江"}"#).unwrap();
        assert_eq!(decoded, r#"{"province":"\u6d59\u6c5f"}"#);
        let value: Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(value["province"], "浙江");
    }

    #[test]
    fn redecode_uses_surrogate_pairs_outside_bmp() {
        assert_eq!(redecode_content("😀").unwrap(), r"\ud83d\ude00");
    }

    #[test]
    fn redecode_rejects_invalid_utf8() {
        assert!(matches!(
            redecode_content("\u{00e9}"),
            Err(SourceError::Redecode(_))
        ));
    }

    #[test]
    fn second_result_wins_when_first_line_has_none() {
        let body = [
            event_line(r#"{"progress": 50}"#),
            event_line(&mojibake(r#"{"result": {"province": "浙江"}}"#)),
            event_line(r#"{"result": {"province": "later"}}"#),
        ]
        .join("\n");

        let result = parse_stream(&body).unwrap();
        assert_eq!(result["province"], "浙江");
    }

    #[test]
    fn malformed_and_foreign_lines_are_skipped() {
        let body = [
            "event: message".to_string(),
            String::new(),
            "data: {not json".to_string(),
            event_line("[[[broken"),
            event_line(r#"{"result": {"ok": true}}"#),
        ]
        .join("\r\n");

        assert_eq!(parse_stream(&body).unwrap(), serde_json::json!({ "ok": true }));
    }

    #[test]
    fn top_level_result_outside_content_is_ignored() {
        let body = [
            format!("data: {}", serde_json::json!({ "result": { "province": "WRONG" } })),
            event_line(&mojibake(r#"{"result": {"province": "浙江"}}"#)),
        ]
        .join("\n");

        assert_eq!(parse_stream(&body).unwrap()["province"], "浙江");
    }

    #[test]
    fn non_string_content_is_skipped() {
        let body = r#"data: {"content": {"x": 1}, "result": "leak"}"#;
        assert!(parse_stream(body).is_none());
        assert!(matches!(
            decode_event(r#"{"content": {"x": 1}, "result": "leak"}"#),
            Err(SourceError::MalformedEvent(_))
        ));
        assert!(decode_event(r#"{"result": "leak"}"#).unwrap().is_none());
    }

    #[test]
    fn stream_without_result_is_none() {
        let body = [event_line(r#"{"node": "start"}"#), "data: [DONE]".to_string()].join("\n");
        assert!(parse_stream(&body).is_none());
    }

    #[test]
    fn narrative_accepts_numeric_strings_and_defaults_country() {
        let data: NarrativeData = serde_json::from_value(serde_json::json!({
            "description": "江南名城",
            "latitude": "30.27",
            "longitude": 120.15,
            "province": []
        }))
        .unwrap();

        assert_eq!(data.latitude, Some(30.27));
        assert_eq!(data.longitude, Some(120.15));
        assert_eq!(data.country, "中国");
        assert_eq!(data.province, "");
        assert_eq!(data.long_description, "");
    }

    proptest! {
        #[test]
        fn mojibake_round_trips(text in "\\PC*") {
            prop_assert_eq!(redecode_content(&mojibake(&text)).unwrap(), text);
        }

        #[test]
        fn decoded_json_survives_redecode(
            text in "[a-zA-Z0-9 ,.!?\u{4e00}-\u{9fa5}\u{1f600}-\u{1f64f}]*"
        ) {
            let doc = serde_json::json!({ "result": { "description": text } }).to_string();
            let parsed: Value = serde_json::from_str(&redecode_content(&doc).unwrap()).unwrap();
            prop_assert_eq!(parsed["result"]["description"].as_str(), Some(text.as_str()));
        }
    }
}
