//! Client for the external summarization service.
//!
//! The service takes `POST {title, content}` as JSON and answers
//! `{summary}`. Anything else (non-2xx status, transport failure, a body that
//! does not parse, an empty summary) is a failure.

use crate::config::WebnoteConfig;
use crate::error::{Result, WebnoteError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    summary: Option<String>,
}

pub trait Summarizer {
    fn summarize(&self, request: &SummaryRequest) -> Result<String>;
}

pub struct HttpSummarizer {
    url: String,
    timeout: Duration,
}

impl HttpSummarizer {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &WebnoteConfig) -> Self {
        Self::new(
            config.summarize_url.clone(),
            Duration::from_secs(config.summarize_timeout_secs),
        )
    }
}

impl Summarizer for HttpSummarizer {
    fn summarize(&self, request: &SummaryRequest) -> Result<String> {
        let body = serde_json::to_string(request)?;
        debug!(url = %self.url, bytes = body.len(), "posting summary request");

        let response = ureq::post(&self.url)
            .set("Content-Type", "application/json")
            .timeout(self.timeout)
            .send_string(&body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    WebnoteError::Service(format!("server responded with status {}", code))
                }
                ureq::Error::Transport(t) => WebnoteError::Network(t.to_string()),
            })?;

        let text = response
            .into_string()
            .map_err(|e| WebnoteError::Network(e.to_string()))?;
        parse_summary_response(&text)
    }
}

/// Extracts the summary from a response body.
pub fn parse_summary_response(body: &str) -> Result<String> {
    let parsed: SummaryResponse = serde_json::from_str(body)
        .map_err(|e| WebnoteError::Service(format!("unreadable response: {}", e)))?;
    match parsed.summary {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(WebnoteError::Service("Empty summary returned".to_string())),
    }
}
