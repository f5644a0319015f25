pub mod duckduckgo;
pub mod static_fallback;
pub mod wikipedia;

pub use duckduckgo::DuckDuckGo;
pub use static_fallback::StaticFallback;
pub use wikipedia::Wikipedia;

#[cfg(test)]
use mockall::automock;

use crate::{
    config::{AssistantConfig, ContextConfig, ContextProviderKind},
    models::ContextData,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Looks up reference text for a query before the model is prompted.
///
/// Implementations never fail: any transport or decoding fault is logged and
/// reported as `None`, meaning no confirmed data is available.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContextProvider {
    fn name(&self) -> &str;
    async fn lookup(&self, query: &str) -> Option<ContextData>;
}

pub type ArcContextProvider = Arc<dyn ContextProvider + Send + Sync>;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),
}

pub fn new_context_provider(
    config: &ContextConfig,
    assistant: &AssistantConfig,
) -> ArcContextProvider {
    let provider: ArcContextProvider = match config.provider {
        ContextProviderKind::Static => {
            Arc::new(StaticFallback::new(&assistant.fallback_answer))
        }
        ContextProviderKind::DuckDuckGo => Arc::new(DuckDuckGo::from(config)),
        ContextProviderKind::Wikipedia => Arc::new(Wikipedia::from(config)),
    };
    log::debug!("Using context provider {}", provider.name());
    provider
}

/// Sends one GET request and decodes the body into `T`.
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    req: reqwest::RequestBuilder,
) -> Result<T, ContextError> {
    let res = req
        .header("User-Agent", crate::config::user_agent())
        .send()
        .await?;
    if !res.status().is_success() {
        return Err(ContextError::Status(res.status().as_u16()));
    }
    let body = res.text().await?;
    Ok(serde_json::from_str(&body)?)
}
