pub mod openai;

pub use openai::OpenAI;

#[cfg(test)]
use mockall::automock;

use crate::{
    config::BackendConfig,
    models::{BackendPrompt, BackendResponse},
};
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;

/// A chat-completion API that answers a prompt with one reply.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Backend {
    fn name(&self) -> &str;
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<BackendResponse>;
}

pub type ArcBackend = Arc<dyn Backend + Send + Sync>;

pub fn new_backend(config: &BackendConfig) -> Result<ArcBackend> {
    if config.model.is_empty() {
        eyre::bail!("no backend model configured");
    }
    if config.api_key.is_none() {
        log::warn!("No API key configured for backend {}", config.endpoint);
    }
    let openai: OpenAI = config.into();
    log::debug!(
        "Using backend {} at {} with model {}",
        openai.name(),
        openai.endpoint(),
        openai.model()
    );
    Ok(Arc::new(openai))
}
