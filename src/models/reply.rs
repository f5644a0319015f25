#[cfg(test)]
#[path = "reply_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PARSE_FAULT_ANSWER: &str = "Error generating response.";

pub const PARSE_FAULT_SOURCE: &str = "Internal Error";

/// The structured answer the model is instructed to produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedReply {
    pub answer: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ParseFault {
    #[error("model returned an empty reply")]
    Empty,
    #[error("model reply is not a valid answer object: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ReplyShape {
    answer: String,
    #[serde(default)]
    sources: Option<Vec<String>>,
}

impl ParsedReply {
    pub fn new(answer: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            answer: answer.into(),
            sources,
        }
    }

    /// Parses `{ "answer": string, "sources": [string] }`. A missing or null
    /// `sources` is accepted as an empty list; anything else that does not
    /// match the shape is a [`ParseFault`].
    pub fn parse(raw: Option<&str>) -> Result<Self, ParseFault> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(ParseFault::Empty);
        }
        let shape: ReplyShape = serde_json::from_str(raw)?;
        Ok(Self {
            answer: shape.answer,
            sources: shape.sources.unwrap_or_default(),
        })
    }

    /// Recovery value for a reply that could not be parsed: the raw text
    /// becomes the answer so the user still sees what the model said.
    pub fn fallback(raw: Option<&str>) -> Self {
        let answer = match raw.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => PARSE_FAULT_ANSWER.to_string(),
        };
        Self {
            answer,
            sources: vec![PARSE_FAULT_SOURCE.to_string()],
        }
    }

    /// Parses the raw reply, recovering locally from any [`ParseFault`].
    pub fn parse_or_fallback(raw: Option<&str>) -> Self {
        match Self::parse(raw) {
            Ok(reply) => reply,
            Err(err) => {
                log::warn!("Falling back from unparseable model reply: {}", err);
                Self::fallback(raw)
            }
        }
    }

    /// Guarantees a non-blank answer and a non-empty source list.
    pub fn normalize(mut self, fallback_answer: &str, fallback_source: &str) -> Self {
        if self.answer.trim().is_empty() {
            self.answer = fallback_answer.to_string();
        }
        self.sources.retain(|s| !s.trim().is_empty());
        if self.sources.is_empty() {
            self.sources = vec![fallback_source.to_string()];
        }
        self
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }
}
