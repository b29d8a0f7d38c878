//! Live scripture text from the ESV API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::scripture::{check_passage_size, VerseSource};
use crate::bible::{parse_bracketed_verses, ScriptureReference, Verse};
use crate::config::Config;
use crate::constants::source;
use crate::error::{Error, Result};

/// Query flags asking for bare, verse-numbered passage text.
const PASSAGE_FLAGS: &[(&str, &str)] = &[
    ("include-headings", "false"),
    ("include-footnotes", "false"),
    ("include-verse-numbers", "true"),
    ("include-short-copyright", "false"),
    ("include-passage-references", "false"),
];

/// Body of a passage-text response.
#[derive(Debug, Deserialize)]
pub struct PassageResponse {
    /// One text block per matched passage.
    #[serde(default)]
    pub passages: Vec<String>,
}

/// Client for the ESV passage text endpoint.
#[derive(Clone)]
pub struct LiveTextSource {
    api_key: String,
    base_url: String,
    max_retries: u32,
    client: Client,
}

impl LiveTextSource {
    /// Create a live source from config; fails when no API key is configured.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.esv_api_key.clone().ok_or_else(|| {
            Error::config("ESV API key not configured", "Set the ESV_API_KEY environment variable")
        })?;

        Ok(Self {
            api_key,
            base_url: source::ESV_PASSAGE_URL.to_string(),
            max_retries: config.max_retries,
            client: Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .unwrap_or_default(),
        })
    }

    /// Point the client at a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// One authenticated request for the passage text.
    async fn request(&self, reference: &ScriptureReference) -> Result<PassageResponse> {
        let query = reference.display();
        let resp = self
            .client
            .get(&self.base_url)
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Accept", "application/json")
            .query(&[("q", query.as_str())])
            .query(PASSAGE_FLAGS)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request for {query} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::scripture_status(
                format!("Request for {query} returned {status}"),
                status.as_u16(),
            ));
        }

        resp.json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON for {query}: {e}"), None::<std::path::PathBuf>))
    }
}

#[async_trait]
impl VerseSource for LiveTextSource {
    async fn fetch(&self, reference: &ScriptureReference) -> Result<Vec<Verse>> {
        check_passage_size(reference)?;

        let mut attempt = 0;
        let response = loop {
            match self.request(reference).await {
                Ok(response) => break response,
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!("ESV request failed ({e}), retry {attempt}/{}", self.max_retries);
                    tokio::time::sleep(Duration::from_millis(source::RETRY_BACKOFF_MS * u64::from(attempt)))
                        .await;
                }
                Err(e) => return Err(e),
            }
        };

        passage_verses(&response, reference)
    }

    fn name(&self) -> &'static str {
        "esv"
    }
}

/// Verses of the first passage in `response`.
pub fn passage_verses(response: &PassageResponse, reference: &ScriptureReference) -> Result<Vec<Verse>> {
    let text = response
        .passages
        .first()
        .ok_or_else(|| Error::scripture(format!("No passage returned for {}", reference.display())))?;

    let verses = parse_bracketed_verses(text);
    if verses.is_empty() {
        return Err(Error::scripture(format!(
            "Passage for {} contained no numbered verses",
            reference.display()
        )));
    }
    Ok(verses)
}
