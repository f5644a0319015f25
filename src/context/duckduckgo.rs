#[cfg(test)]
#[path = "duckduckgo_test.rs"]
mod tests;

use std::time;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{ContextConfig, constants::DUCKDUCKGO_ENDPOINT};
use crate::context::{ContextError, ContextProvider, get_json};
use crate::models::ContextData;

pub const DUCKDUCKGO_SOURCE: &str = "duckduckgo.com";

/// Instant-answer lookup: the abstract of the best match, or the first
/// related topic when there is no abstract.
pub struct DuckDuckGo {
    endpoint: String,
    timeout: Option<time::Duration>,
    client: reqwest::Client,
}

#[derive(Debug, Default, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

/// Either a topic with text or a named group of nested topics.
#[derive(Debug, Default, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text", default)]
    text: Option<String>,
    #[serde(rename = "Topics", default)]
    topics: Vec<RelatedTopic>,
}

#[async_trait]
impl ContextProvider for DuckDuckGo {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn lookup(&self, query: &str) -> Option<ContextData> {
        match self.fetch(query).await {
            Ok(data) => data,
            Err(err) => {
                log::warn!("DuckDuckGo lookup failed: {}", err);
                None
            }
        }
    }
}

impl From<&ContextConfig> for DuckDuckGo {
    fn from(value: &ContextConfig) -> Self {
        let mut ddg = DuckDuckGo::default();
        if let Some(endpoint) = value.endpoint.as_deref() {
            ddg = ddg.with_endpoint(endpoint);
        }
        ddg.timeout = value.timeout();
        ddg
    }
}

impl DuckDuckGo {
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn fetch(&self, query: &str) -> Result<Option<ContextData>, ContextError> {
        let mut req = self.client.get(format!("{}/", self.endpoint)).query(&[
            ("q", query),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
        ]);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let answer: InstantAnswer = get_json(req).await?;
        log::trace!("DuckDuckGo answer: {:?}", answer);

        Ok(answer
            .best_text()
            .map(|text| ContextData::new(text).with_source(DUCKDUCKGO_SOURCE)))
    }
}

impl InstantAnswer {
    fn best_text(&self) -> Option<&str> {
        let abstract_text = self.abstract_text.trim();
        if !abstract_text.is_empty() {
            return Some(abstract_text);
        }
        self.related_topics.iter().find_map(RelatedTopic::first_text)
    }
}

impl RelatedTopic {
    fn first_text(&self) -> Option<&str> {
        match self.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(text),
            _ => self.topics.iter().find_map(RelatedTopic::first_text),
        }
    }
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self {
            endpoint: DUCKDUCKGO_ENDPOINT.to_string(),
            timeout: None,
            client: reqwest::Client::new(),
        }
    }
}
