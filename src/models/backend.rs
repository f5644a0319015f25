use std::fmt::Display;

use crate::models::ChatTurn;

/// Everything the model needs for one completion: the system instruction,
/// the prior turns of the session (oldest first) and the current message.
#[derive(Debug, Clone, Default)]
pub struct BackendPrompt {
    system: String,
    history: Vec<ChatTurn>,
    text: String,
}

#[derive(Debug, Clone, Default)]
pub struct BackendResponse {
    pub id: String,
    pub model: String,
    pub content: Option<String>,
    pub usage: Option<BackendUsage>,
}

#[derive(Debug, Default, Clone)]
pub struct BackendUsage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

impl BackendPrompt {
    pub fn new(text: impl Into<String>) -> BackendPrompt {
        BackendPrompt {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Display for BackendUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Prompt Tokens: {}, Completion Token: {}, Total: {}",
            self.prompt_tokens, self.completion_tokens, self.total_tokens
        )
    }
}
