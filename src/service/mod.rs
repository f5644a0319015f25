#[cfg(test)]
#[path = "service_test.rs"]
mod tests;

pub mod prompt;

pub use prompt::build_system_prompt;

use eyre::{Context, Result, bail};

use crate::{
    backend::ArcBackend,
    config::{AssistantConfig, Configuration},
    context::ArcContextProvider,
    models::{BackendPrompt, ChatResponse, ChatTurn, NewTurn, ParsedReply},
    storage::ArcStorage,
};

/// Processes chat turns: looks up context, prompts the model, and records
/// both sides of the exchange.
///
/// Nothing is rolled back on failure. The user turn is already stored when
/// the model call runs, so a failed call leaves it without a reply.
#[derive(Clone)]
pub struct ChatService {
    backend: ArcBackend,
    storage: ArcStorage,
    context: ArcContextProvider,
    assistant: AssistantConfig,
    history_turns: usize,
}

impl ChatService {
    pub fn new(backend: ArcBackend, storage: ArcStorage, context: ArcContextProvider) -> Self {
        Self {
            backend,
            storage,
            context,
            assistant: AssistantConfig::default(),
            history_turns: crate::config::constants::HISTORY_TURNS,
        }
    }

    pub fn from_config(
        config: &Configuration,
        backend: ArcBackend,
        storage: ArcStorage,
        context: ArcContextProvider,
    ) -> Self {
        Self::new(backend, storage, context)
            .with_assistant(config.assistant.clone())
            .with_history_turns(config.context.history_turns)
    }

    pub fn with_assistant(mut self, assistant: AssistantConfig) -> Self {
        self.assistant = assistant;
        self
    }

    pub fn with_history_turns(mut self, history_turns: usize) -> Self {
        self.history_turns = history_turns;
        self
    }

    pub fn assistant(&self) -> &AssistantConfig {
        &self.assistant
    }

    /// Answers one user message within a session, creating the session when
    /// no id is given.
    pub async fn handle_chat_send(
        &self,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<ChatResponse> {
        if message.trim().is_empty() {
            bail!("message must not be empty");
        }
        let session_id = resolve_session_id(session_id);
        log::debug!("Processing chat turn for session {}", session_id);

        let history = self
            .storage
            .recent_turns(&session_id, self.history_turns)
            .await
            .wrap_err("loading session history")?;

        self.storage
            .append_turn(NewTurn::user(&session_id, message))
            .await
            .wrap_err("storing user turn")?;

        let reply = match self.context.lookup(message).await {
            Some(data) => {
                let system = build_system_prompt(&self.assistant, data.text());
                let prompt = BackendPrompt::new(message)
                    .with_system(system)
                    .with_history(history);

                let res = self
                    .backend
                    .get_completion(prompt)
                    .await
                    .wrap_err(format!("getting completion from {}", self.backend.name()))?;
                if let Some(usage) = res.usage.as_ref() {
                    log::debug!("Completion {} usage: {}", res.id, usage);
                }

                let reply = ParsedReply::parse_or_fallback(res.content.as_deref()).normalize(
                    &self.assistant.fallback_answer,
                    &self.assistant.fallback_source,
                );
                match data.source() {
                    Some(source) => reply.with_sources(vec![source.to_string()]),
                    None => reply,
                }
            }
            None => {
                log::info!(
                    "No context data from {} for session {}, answering with fallback",
                    self.context.name(),
                    session_id
                );
                self.fallback_reply()
            }
        };

        self.storage
            .append_turn(NewTurn::assistant(
                &session_id,
                &reply.answer,
                reply.sources.clone(),
            ))
            .await
            .wrap_err("storing assistant turn")?;

        Ok(ChatResponse {
            answer: reply.answer,
            sources: reply.sources,
            session_id,
        })
    }

    /// Returns stored turns in conversation order, optionally for one session.
    pub async fn history(&self, session_id: Option<&str>) -> Result<Vec<ChatTurn>> {
        self.storage
            .list_turns(session_id)
            .await
            .wrap_err("listing chat history")
    }

    fn fallback_reply(&self) -> ParsedReply {
        ParsedReply::new(
            &self.assistant.fallback_answer,
            vec![self.assistant.fallback_source.clone()],
        )
    }
}

/// Uses the client's session id when present, otherwise starts a new
/// session with a random id.
pub fn resolve_session_id(session_id: Option<&str>) -> String {
    match session_id {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => uuid::Uuid::new_v4().to_string(),
    }
}
