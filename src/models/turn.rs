#[cfg(test)]
#[path = "turn_test.rs"]
mod tests;

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

/// One stored message of a conversation. Turns are only ever created, never
/// updated, and their `created_at` order is the conversation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    id: i64,
    session_id: String,
    role: Role,
    content: String,
    sources: Option<Vec<String>>,
    created_at: DateTime<Utc>,
}

/// A turn that has not been persisted yet. The constructors keep `sources`
/// absent for user turns and present for assistant turns.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTurn {
    session_id: String,
    role: Role,
    content: String,
    sources: Option<Vec<String>>,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(eyre::eyre!("unknown role: {}", other)),
        }
    }
}

impl NewTurn {
    pub fn user(session_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            role: Role::User,
            content: content.into(),
            sources: None,
        }
    }

    pub fn assistant(
        session_id: impl Into<String>,
        content: impl Into<String>,
        sources: Vec<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            role: Role::Assistant,
            content: content.into(),
            sources: Some(sources),
        }
    }

    /// Attaches the store-assigned identifier and creation time.
    pub fn into_turn(self, id: i64, created_at: DateTime<Utc>) -> ChatTurn {
        ChatTurn {
            id,
            session_id: self.session_id,
            role: self.role,
            content: self.content,
            sources: self.sources,
            created_at,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sources(&self) -> Option<&[String]> {
        self.sources.as_deref()
    }
}

impl ChatTurn {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sources(&self) -> Option<&[String]> {
        self.sources.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
