use async_trait::async_trait;

use crate::context::ContextProvider;
use crate::models::ContextData;

/// Answers every lookup with the same "not available" notice, without any
/// network call.
pub struct StaticFallback {
    text: String,
}

impl StaticFallback {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl ContextProvider for StaticFallback {
    fn name(&self) -> &str {
        "static"
    }

    async fn lookup(&self, _query: &str) -> Option<ContextData> {
        Some(ContextData::new(&self.text))
    }
}
