#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Shared types for the two-agent conversation bridge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod util;

pub use util::{ERROR_PREFIX, error_response, is_error_response, truncate_chars};

/// Who produced a turn.
///
/// `AgentA` is backed by Claude, `AgentB` by Gemini. The persisted names
/// match the backend names so transcripts stay readable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sender {
    Human,
    #[serde(rename = "Claude")]
    AgentA,
    #[serde(rename = "Gemini")]
    AgentB,
}

impl Sender {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::AgentA => "Claude",
            Self::AgentB => "Gemini",
        }
    }

    /// The other conversational agent. A human hands off to `AgentA`.
    #[must_use]
    pub const fn partner(self) -> Self {
        match self {
            Self::AgentA => Self::AgentB,
            Self::Human | Self::AgentB => Self::AgentA,
        }
    }

    /// Agent addressed in a given round: even rounds go to `AgentA`.
    #[must_use]
    pub const fn for_round(round: usize) -> Self {
        if round % 2 == 0 {
            Self::AgentA
        } else {
            Self::AgentB
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recorded exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    pub message: String,
    pub response: Option<String>,
}

impl Turn {
    #[must_use]
    pub fn new(sender: Sender, message: impl Into<String>, response: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            sender,
            message: message.into(),
            response,
        }
    }
}

/// Failure talking to a backend. Never crosses [`AgentClient::ask`]; it is
/// rendered into an error response instead.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to reach {backend}: {reason}")]
    Transport {
        backend: &'static str,
        reason: String,
    },

    #[error("{backend} rejected the credentials ({status}): {body}")]
    Auth {
        backend: &'static str,
        status: u16,
        body: String,
    },

    #[error("{backend} API returned {status}: {body}")]
    Status {
        backend: &'static str,
        status: u16,
        body: String,
    },

    #[error("unexpected {backend} response: {reason}")]
    Protocol {
        backend: &'static str,
        reason: String,
    },
}

/// Uniform request/response contract over a conversational backend.
///
/// `ask` always yields text. Implementations log failures and return them
/// through [`error_response`] so the conversation keeps going.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// The participant this client speaks for.
    fn sender(&self) -> Sender;

    async fn ask(&self, message: &str, context: &str) -> String;
}
