#![warn(
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

//! Two-agent conversation orchestration.
//!
//! Drives a strictly alternating exchange between two `AgentClient`s,
//! priming each request with a short digest of recent turns and
//! persisting every round to a `TranscriptStore`.
//!
//! # Key Features
//! - Round parity decides the speaker: even rounds `AgentA`, odd rounds `AgentB`
//! - Bounded context window over the transcript
//! - Pluggable termination policy (farewell phrases by default)
//! - Mockable pacing between rounds

pub mod context;
mod observer;
mod orchestrator;
mod policy;

pub use context::{ContextWindow, recent_context};
pub use observer::{ConversationObserver, SilentObserver};
pub use orchestrator::{
    ConversationOrchestrator, ConversationOutcome, ConversationState, OrchestratorConfig, Phase,
    TOPIC_PLACEHOLDER, TerminationReason,
};
pub use policy::{FarewellPhrases, NoPause, Pacer, TerminationPolicy, TokioPacer};
