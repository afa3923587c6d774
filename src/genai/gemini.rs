//! Streaming client for the Gemini generateContent API
//!
//! Talks to `models/{model}:streamGenerateContent?alt=sse` and decodes
//! the SSE `data:` lines into plain text fragments. Lines are buffered
//! across network chunks since SSE events do not align with read
//! boundaries.

use crate::config::ServiceConfig;
use crate::genai::{GenerativeService, ReplyStream, Turn};
use crate::{CakapError, Result};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub struct GeminiClient {
    client: Client,
    config: ServiceConfig,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse&key={}",
            self.config.base_url, self.config.model, self.config.api_key
        )
    }

    fn request_body(turns: &[Turn], config: &ServiceConfig) -> serde_json::Value {
        let contents: Vec<serde_json::Value> = turns
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": turn.role.as_str(),
                    "parts": [{ "text": turn.text }],
                })
            })
            .collect();

        serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": config.max_output_tokens,
                "temperature": config.temperature,
            },
        })
    }
}

/// Extract the text fragment carried by one SSE line, if any
///
/// Non-data lines (comments, event names, blank keep-alives) and chunks
/// without text parts yield nothing. A `data:` payload that fails to
/// decode is an error: dropping it would silently truncate the reply.
fn parse_sse_line(line: &str) -> Result<Option<String>> {
    let Some(data) = line.strip_prefix("data:") else {
        return Ok(None);
    };
    let data = data.trim();
    if data.is_empty() || data == "[DONE]" {
        return Ok(None);
    }

    let chunk: StreamChunk = serde_json::from_str(data)
        .map_err(|e| CakapError::Service(format!("malformed stream event: {e}")))?;
    let mut text = String::new();
    for candidate in chunk.candidates {
        if let Some(content) = candidate.content {
            for part in content.parts {
                if let Some(t) = part.text {
                    text.push_str(&t);
                }
            }
        }
    }

    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

#[async_trait]
impl GenerativeService for GeminiClient {
    async fn stream_reply(&self, turns: &[Turn]) -> Result<ReplyStream> {
        let body = Self::request_body(turns, &self.config);
        let response = self.client.post(self.endpoint()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CakapError::Service(format!("HTTP {status}: {detail}")));
        }
        debug!(model = %self.config.model, "reply stream opened");

        let stream = try_stream! {
            let mut bytes = response.bytes_stream();
            let mut pending = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = chunk.map_err(|e| CakapError::Service(e.to_string()))?;
                pending.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(pos) = pending.find('\n') {
                    let line: String = pending.drain(..=pos).collect();
                    if let Some(text) = parse_sse_line(line.trim())? {
                        yield text;
                    }
                }
            }

            // A final event without a trailing newline is still an event
            if let Some(text) = parse_sse_line(pending.trim())? {
                yield text;
            }
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genai::Role;

    #[test]
    fn test_parse_sse_data_line() {
        let line = r#"data: {"candidates":[{"content":{"parts":[{"text":"Selamat"}]}}]}"#;
        assert_eq!(parse_sse_line(line).unwrap().as_deref(), Some("Selamat"));
    }

    #[test]
    fn test_parse_ignores_non_data_lines() {
        assert_eq!(parse_sse_line("").unwrap(), None);
        assert_eq!(parse_sse_line(": keep-alive").unwrap(), None);
        assert_eq!(parse_sse_line("event: message").unwrap(), None);
        assert_eq!(parse_sse_line("data: [DONE]").unwrap(), None);
    }

    #[test]
    fn test_parse_ignores_chunks_without_text() {
        let line = r#"data: {"candidates":[{"finishReason":"STOP"}]}"#;
        assert_eq!(parse_sse_line(line).unwrap(), None);
    }

    #[test]
    fn test_malformed_data_payload_is_an_error() {
        // Truncated mid-event, as a dropped connection would leave it
        let line = r#"data: {"candidates":[{"content":{"parts":[{"text":"Sel"#;
        let err = parse_sse_line(line).unwrap_err();
        assert!(matches!(err, CakapError::Service(_)));
    }

    #[test]
    fn test_request_body_shape() {
        let config = ServiceConfig::new("secret");
        let turns = [Turn::user("Halo"), Turn::model("Selamat pagi")];
        let body = GeminiClient::request_body(&turns, &config);

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Halo");
        assert_eq!(body["contents"][1]["role"], "model");
        // The credential travels in the URL, never in the body
        assert!(!body.to_string().contains("secret"));
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Model.as_str(), "model");
    }
}
