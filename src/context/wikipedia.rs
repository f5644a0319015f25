#[cfg(test)]
#[path = "wikipedia_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::time;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{ContextConfig, constants::WIKIPEDIA_ENDPOINT};
use crate::context::{ContextError, ContextProvider, get_json};
use crate::models::ContextData;

pub const WIKIPEDIA_SOURCE: &str = "wikipedia.org";

/// Page id the query API reports for a title that does not exist.
const MISSING_PAGE_ID: &str = "-1";

/// Encyclopedia lookup: the plain-text intro of the article whose title
/// matches the query.
pub struct Wikipedia {
    endpoint: String,
    timeout: Option<time::Duration>,
    client: reqwest::Client,
}

#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryPages>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: BTreeMap<String, Page>,
}

#[derive(Debug, Default, Deserialize)]
struct Page {
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    missing: Option<serde_json::Value>,
}

#[async_trait]
impl ContextProvider for Wikipedia {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn lookup(&self, query: &str) -> Option<ContextData> {
        match self.fetch(query).await {
            Ok(data) => data,
            Err(err) => {
                log::warn!("Wikipedia lookup failed: {}", err);
                None
            }
        }
    }
}

impl From<&ContextConfig> for Wikipedia {
    fn from(value: &ContextConfig) -> Self {
        let mut wiki = Wikipedia::default();
        if let Some(endpoint) = value.endpoint.as_deref() {
            wiki = wiki.with_endpoint(endpoint);
        }
        wiki.timeout = value.timeout();
        wiki
    }
}

impl Wikipedia {
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn fetch(&self, query: &str) -> Result<Option<ContextData>, ContextError> {
        let mut req = self
            .client
            .get(format!("{}/w/api.php", self.endpoint))
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", query),
            ]);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let res: QueryResponse = get_json(req).await?;
        Ok(res.extract().map(|text| ContextData::new(text).with_source(WIKIPEDIA_SOURCE)))
    }
}

impl QueryResponse {
    fn extract(&self) -> Option<&str> {
        let (id, page) = self.query.as_ref()?.pages.iter().next()?;
        if id == MISSING_PAGE_ID || page.missing.is_some() {
            log::debug!("Wikipedia has no page for the query");
            return None;
        }
        page.extract
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

impl Default for Wikipedia {
    fn default() -> Self {
        Self {
            endpoint: WIKIPEDIA_ENDPOINT.to_string(),
            timeout: None,
            client: reqwest::Client::new(),
        }
    }
}
