//! Turn-taking loop between the two agents.
//!
//! Even rounds go to `AgentA`, odd rounds to `AgentB`. Each reply is
//! recorded and becomes the next outgoing message, until a farewell phrase
//! shows up or the round limit is reached.

use aibridge_core::{AgentClient, Sender, Turn};
use aibridge_transcript::TranscriptStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::context::ContextWindow;
use crate::observer::{ConversationObserver, SilentObserver};
use crate::policy::{FarewellPhrases, Pacer, TerminationPolicy, TokioPacer};

/// Placeholder replaced by the topic in the greeting template.
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Configuration for a conversation run.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Upper bound on rounds; reaching it is a normal end
    pub max_rounds: usize,
    /// Pause after every round
    pub pacing: Duration,
    /// History included in each request
    pub context: ContextWindow,
    /// Seed message; `{topic}` is substituted
    pub greeting_template: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            pacing: Duration::from_secs(2),
            context: ContextWindow::default(),
            greeting_template: "Hi! Let's discuss how the project is going. Current topic: {topic}"
                .to_string(),
        }
    }
}

/// Where the state machine stands between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingA,
    AwaitingB,
    Terminated,
}

impl Phase {
    #[must_use]
    pub const fn awaiting(sender: Sender) -> Self {
        match sender {
            Sender::AgentB => Self::AwaitingB,
            Sender::Human | Sender::AgentA => Self::AwaitingA,
        }
    }

    /// Agent that speaks next, if any.
    #[must_use]
    pub const fn destination(self) -> Option<Sender> {
        match self {
            Self::AwaitingA => Some(Sender::AgentA),
            Self::AwaitingB => Some(Sender::AgentB),
            Self::Terminated => None,
        }
    }
}

/// Transient state of one run. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    pub current_message: String,
    pub current_sender: Sender,
    pub round_index: usize,
    pub phase: Phase,
}

impl ConversationState {
    /// Fresh state: the human's seed message, addressed to round 0.
    #[must_use]
    pub const fn new(seed: String) -> Self {
        Self {
            current_message: seed,
            current_sender: Sender::Human,
            round_index: 0,
            phase: Phase::awaiting(Sender::for_round(0)),
        }
    }

    /// Record a reply from `from` and hand the turn to its partner.
    pub fn advance(&mut self, from: Sender, response: String) {
        self.current_message = response;
        self.current_sender = from;
        self.round_index += 1;
        self.phase = Phase::awaiting(Sender::for_round(self.round_index));
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// `sender`'s reply matched the termination policy
    Farewell { sender: Sender },
    RoundLimit,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationOutcome {
    pub rounds: usize,
    pub reason: TerminationReason,
    pub last_message: String,
}

/// Drives the alternating conversation and records every round.
pub struct ConversationOrchestrator<'a> {
    agent_a: Arc<dyn AgentClient>,
    agent_b: Arc<dyn AgentClient>,
    store: &'a mut TranscriptStore,
    config: OrchestratorConfig,
    termination: Box<dyn TerminationPolicy>,
    pacer: Arc<dyn Pacer>,
    observer: Arc<dyn ConversationObserver>,
}

impl<'a> ConversationOrchestrator<'a> {
    pub fn new(
        agent_a: Arc<dyn AgentClient>,
        agent_b: Arc<dyn AgentClient>,
        store: &'a mut TranscriptStore,
    ) -> Self {
        Self {
            agent_a,
            agent_b,
            store,
            config: OrchestratorConfig::default(),
            termination: Box::new(FarewellPhrases::default()),
            pacer: Arc::new(TokioPacer),
            observer: Arc::new(SilentObserver),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_termination(mut self, policy: impl TerminationPolicy + 'static) -> Self {
        self.termination = Box::new(policy);
        self
    }

    #[must_use]
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn seed_message(&self, topic: &str) -> String {
        self.config.greeting_template.replace(TOPIC_PLACEHOLDER, topic)
    }

    /// Run a conversation on `topic` to completion.
    ///
    /// Backend and storage failures never abort the run: error replies are
    /// recorded and passed on like any other message.
    pub async fn run(&mut self, topic: &str) -> ConversationOutcome {
        info!(
            "Starting conversation: topic={topic:?}, max_rounds={}",
            self.config.max_rounds
        );
        self.observer.on_start(topic);

        let mut state = ConversationState::new(self.seed_message(topic));

        while state.round_index < self.config.max_rounds {
            let Some(destination) = state.phase.destination() else {
                break;
            };
            self.observer.on_round(state.round_index);
            self.play_round(&mut state, destination).await;
        }

        let reason = if state.phase == Phase::Terminated {
            TerminationReason::Farewell {
                sender: state.current_sender,
            }
        } else {
            TerminationReason::RoundLimit
        };

        let outcome = ConversationOutcome {
            rounds: state.round_index,
            reason,
            last_message: state.current_message,
        };

        info!(
            "Conversation finished after {} rounds: {:?}",
            outcome.rounds, outcome.reason
        );
        self.observer.on_finish(&outcome);
        outcome
    }

    async fn play_round(&mut self, state: &mut ConversationState, destination: Sender) {
        let client = match destination {
            Sender::AgentB => &self.agent_b,
            Sender::Human | Sender::AgentA => &self.agent_a,
        };

        debug!("Round {}: sending to {destination}", state.round_index);
        self.observer.on_outgoing(destination, &state.current_message);

        let context = self.config.context.render(self.store.turns());
        let response = client.ask(&state.current_message, &context).await;

        self.observer.on_response(destination, &response);

        let turn = Turn::new(
            destination,
            state.current_message.clone(),
            Some(response.clone()),
        );
        if self.store.append(turn).is_err() {
            debug!("Transcript flush failed; turn kept in memory");
        }

        state.advance(destination, response);

        self.pacer.pause(self.config.pacing).await;

        if self.termination.should_terminate(&state.current_message) {
            info!("{destination} said farewell, ending conversation");
            state.phase = Phase::Terminated;
        }
    }
}
