#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use crate::backend::{ArcBackend, Backend};
use crate::config::{BackendConfig, user_agent};
use crate::models::{BackendPrompt, BackendResponse, BackendUsage, ChatTurn, Role};
use async_trait::async_trait;
use eyre::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::{fmt::Display, time};
use thiserror::Error;

pub struct OpenAI {
    alias: String,
    endpoint: String,
    api_key: Option<String>,
    timeout: Option<time::Duration>,
    model: String,
    json_mode: bool,
    client: reqwest::Client,
}

#[async_trait]
impl Backend for OpenAI {
    fn name(&self) -> &str {
        &self.alias
    }

    async fn get_completion(&self, prompt: BackendPrompt) -> Result<BackendResponse> {
        if self.model.is_empty() {
            bail!("no model is set");
        }

        let mut messages = Vec::with_capacity(prompt.history().len() + 2);
        if !prompt.system().is_empty() {
            messages.push(MessageRequest::new("system", prompt.system()));
        }
        messages.extend(prompt.history().iter().map(MessageRequest::from));
        messages.push(MessageRequest::new("user", prompt.text()));

        let completion_req = CompletionRequest {
            model: self.model.clone(),
            messages,
            response_format: self.json_mode.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        self.chat_completion(&completion_req).await
    }
}

impl From<OpenAI> for ArcBackend {
    fn from(value: OpenAI) -> Self {
        Arc::new(value)
    }
}

impl From<&BackendConfig> for OpenAI {
    fn from(value: &BackendConfig) -> Self {
        let mut openai = OpenAI::default()
            .with_endpoint(&value.endpoint)
            .with_model(&value.model)
            .with_json_mode(value.json_mode);

        if let Some(api_key) = value.api_key.as_deref() {
            openai.api_key = Some(api_key.to_string());
        }

        if let Some(timeout) = value.timeout() {
            openai.timeout = Some(timeout);
        }
        openai
    }
}

impl OpenAI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn timeout(&self) -> Option<time::Duration> {
        self.timeout
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat_completion(&self, completion_req: &CompletionRequest) -> Result<BackendResponse> {
        let mut req = self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .header("Content-Type", "application/json")
            .header("User-Agent", user_agent());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        if let Some(token) = &self.api_key {
            req = req.bearer_auth(token);
        }

        log::trace!("Sending completion request: {:?}", completion_req);

        let res = req
            .json(completion_req)
            .send()
            .await
            .wrap_err("sending completion request")?;

        if !res.status().is_success() {
            let http_code = res.status().as_u16();
            let resp = res.text().await.wrap_err("reading error response")?;
            log::error!("Error response: {}", resp);
            let mut err = match serde_json::from_str::<ErrorResponse>(&resp) {
                Ok(err) => err.error,
                Err(_) => OpenAIError {
                    message: resp,
                    err_type: "unknown".to_string(),
                    ..Default::default()
                },
            };
            err.http_code = http_code;
            return Err(err.into());
        }

        let data = res
            .json::<CompletionResponse>()
            .await
            .wrap_err("parsing completion response")?;

        log::trace!("Completion response: {:?}", data);

        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);

        Ok(BackendResponse {
            id: data.id,
            model: data.model.unwrap_or_else(|| completion_req.model.clone()),
            content,
            usage: data.usage.map(|usage| BackendUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
        })
    }
}

impl Default for OpenAI {
    fn default() -> Self {
        Self {
            alias: "OpenAI".to_string(),
            endpoint: "https://api.openai.com".to_string(),
            api_key: None,
            timeout: None,
            model: String::new(),
            json_mode: true,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct CompletionMessageResponse {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: Option<String>,
    choices: Vec<CompletionChoiceResponse>,
    #[serde(default)]
    usage: Option<CompletionUsageResponse>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct CompletionUsageResponse {
    prompt_tokens: usize,
    completion_tokens: usize,
    total_tokens: usize,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: OpenAIError,
}

#[derive(Default, Error, Debug, Serialize, Deserialize)]
pub struct OpenAIError {
    #[serde(skip)]
    pub http_code: u16,
    pub message: String,
    #[serde(rename = "type", default)]
    pub err_type: String,
    #[serde(default)]
    pub param: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl Display for OpenAIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OpenAI error ({}): {}", self.http_code, self.message)
    }
}

impl MessageRequest {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

impl From<&ChatTurn> for MessageRequest {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: match turn.role() {
                Role::User => "user".to_string(),
                Role::Assistant => "assistant".to_string(),
            },
            content: turn.content().to_string(),
        }
    }
}
