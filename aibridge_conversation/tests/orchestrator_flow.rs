//! Integration tests for the conversation loop.
//!
//! Scripted agents stand in for the backends so every run is
//! deterministic, and pacing is recorded instead of slept.

use aibridge_conversation::{
    ConversationObserver, ConversationOrchestrator, ConversationOutcome, FarewellPhrases,
    OrchestratorConfig, Pacer, TerminationReason,
};
use aibridge_core::{AgentClient, Sender, Turn, error_response, is_error_response};
use aibridge_transcript::TranscriptStore;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Agent that replays canned replies, then falls back to numbered ones.
struct ScriptedAgent {
    sender: Sender,
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedAgent {
    fn new(sender: Sender, replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            sender,
            replies: Mutex::new(replies.iter().map(ToString::to_string).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentClient for ScriptedAgent {
    fn sender(&self) -> Sender {
        self.sender
    }

    async fn ask(&self, message: &str, context: &str) -> String {
        let mut calls = self.calls.lock().unwrap();
        calls.push((message.to_string(), context.to_string()));
        let n = calls.len();
        drop(calls);

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| format!("{} reply {n}", self.sender))
    }
}

#[derive(Default)]
struct CountingPacer {
    pauses: AtomicUsize,
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self, duration: Duration) {
        assert_eq!(duration, Duration::from_secs(2));
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl ConversationObserver for RecordingObserver {
    fn on_round(&self, round: usize) {
        self.events.lock().unwrap().push(format!("round {round}"));
    }

    fn on_outgoing(&self, to: Sender, _message: &str) {
        self.events.lock().unwrap().push(format!("to {to}"));
    }

    fn on_response(&self, from: Sender, _response: &str) {
        self.events.lock().unwrap().push(format!("from {from}"));
    }

    fn on_finish(&self, outcome: &ConversationOutcome) {
        self.events
            .lock()
            .unwrap()
            .push(format!("finish {}", outcome.rounds));
    }
}

struct Fixture {
    agent_a: Arc<ScriptedAgent>,
    agent_b: Arc<ScriptedAgent>,
    pacer: Arc<CountingPacer>,
    store: TranscriptStore,
    _tmp: tempfile::TempDir,
}

impl Fixture {
    fn new(a_replies: &[&str], b_replies: &[&str]) -> Self {
        let tmp = tempfile::tempdir().unwrap();
        Self {
            agent_a: ScriptedAgent::new(Sender::AgentA, a_replies),
            agent_b: ScriptedAgent::new(Sender::AgentB, b_replies),
            pacer: Arc::new(CountingPacer::default()),
            store: TranscriptStore::open(tmp.path().join("conversation.json")),
            _tmp: tmp,
        }
    }

    async fn run(&mut self, topic: &str) -> ConversationOutcome {
        ConversationOrchestrator::new(self.agent_a.clone(), self.agent_b.clone(), &mut self.store)
            .with_pacer(self.pacer.clone())
            .run(topic)
            .await
    }
}

#[tokio::test]
async fn test_alternates_and_stops_at_round_limit() {
    let mut fx = Fixture::new(&[], &[]);

    let outcome = fx.run("caching").await;

    assert_eq!(outcome.rounds, 10);
    assert_eq!(outcome.reason, TerminationReason::RoundLimit);
    assert_eq!(fx.store.len(), 10);
    for (k, turn) in fx.store.turns().iter().enumerate() {
        let expected = if k % 2 == 0 {
            Sender::AgentA
        } else {
            Sender::AgentB
        };
        assert_eq!(turn.sender, expected, "round {k}");
    }
    assert_eq!(fx.agent_a.calls().len(), 5);
    assert_eq!(fx.agent_b.calls().len(), 5);
    assert_eq!(fx.pacer.pauses.load(Ordering::SeqCst), 10);
}

#[tokio::test]
async fn test_seed_message_goes_to_agent_a() {
    let mut fx = Fixture::new(&[], &[]);

    fx.run("X").await;

    let first = &fx.agent_a.calls()[0];
    assert_eq!(
        first.0,
        "Hi! Let's discuss how the project is going. Current topic: X"
    );
    assert_eq!(first.1, "", "empty transcript yields empty context");
    assert_eq!(fx.store.turns()[0].sender, Sender::AgentA);
    assert_eq!(fx.store.turns()[0].message, first.0);
}

#[tokio::test]
async fn test_each_reply_becomes_next_message() {
    let mut fx = Fixture::new(&["A says one", "A says three"], &["B says two"]);

    fx.run("relay").await;

    let turns = fx.store.turns();
    assert_eq!(turns[0].response.as_deref(), Some("A says one"));
    assert_eq!(turns[1].message, "A says one");
    assert_eq!(turns[1].response.as_deref(), Some("B says two"));
    assert_eq!(turns[2].message, "B says two");
    assert_eq!(fx.agent_b.calls()[0].0, "A says one");
}

#[tokio::test]
async fn test_context_built_from_recent_turns() {
    let mut fx = Fixture::new(&["first reply"], &[]);

    fx.run("context").await;

    let b_first = &fx.agent_b.calls()[0];
    assert_eq!(
        b_first.1,
        "Claude: Hi! Let's discuss how the project is going. Current topic: context..."
    );

    // Round 9 sees only the five turns before it.
    let b_last = fx.agent_b.calls().last().cloned().unwrap();
    assert_eq!(b_last.1.split(" | ").count(), 5);
}

#[tokio::test]
async fn test_farewell_stops_early() {
    let mut fx = Fixture::new(&["hello"], &["ok", "Thanks, Goodbye!"]);

    let outcome = fx.run("short chat").await;

    // Rounds: 0 A "hello", 1 B "ok", 2 A fallback, 3 B farewell.
    assert_eq!(outcome.rounds, 4);
    assert_eq!(
        outcome.reason,
        TerminationReason::Farewell {
            sender: Sender::AgentB
        }
    );
    assert_eq!(outcome.last_message, "Thanks, Goodbye!");
    assert_eq!(fx.store.len(), 4);
    assert_eq!(fx.agent_a.calls().len(), 2);
    assert_eq!(fx.pacer.pauses.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_backend_error_is_recorded_and_passed_on() {
    let failure = error_response(&"failed to reach Gemini: connection refused");
    let mut fx = Fixture::new(&[], &[failure.as_str()]);

    let outcome = fx.run("resilience").await;

    assert_eq!(outcome.rounds, 10);
    let turns = fx.store.turns();
    assert_eq!(turns[1].sender, Sender::AgentB);
    assert!(is_error_response(turns[1].response.as_deref().unwrap()));
    assert_eq!(turns[2].message, failure);
    assert_eq!(fx.agent_a.calls()[1].0, failure);
}

#[tokio::test]
async fn test_transcript_persisted_after_run() {
    let mut fx = Fixture::new(&[], &["bye for now"]);

    fx.run("persistence").await;

    let on_disk: Vec<Turn> = TranscriptStore::load(fx.store.path()).unwrap();
    assert_eq!(on_disk.len(), 2);
    assert_eq!(on_disk, fx.store.turns());
}

#[tokio::test]
async fn test_existing_history_primes_first_round() {
    let mut fx = Fixture::new(&[], &[]);
    fx.store
        .append(Turn::new(
            Sender::AgentB,
            "earlier question",
            Some("earlier answer".to_string()),
        ))
        .unwrap();

    fx.run("resume").await;

    assert_eq!(fx.agent_a.calls()[0].1, "Gemini: earlier question...");
    assert_eq!(fx.store.len(), 11);
}

#[tokio::test]
async fn test_custom_config_and_policy() {
    let mut fx = Fixture::new(&[], &[]);
    let observer = Arc::new(RecordingObserver::default());

    let config = OrchestratorConfig {
        max_rounds: 3,
        greeting_template: "Topic is {topic}".to_string(),
        ..OrchestratorConfig::default()
    };

    let outcome = ConversationOrchestrator::new(
        fx.agent_a.clone(),
        fx.agent_b.clone(),
        &mut fx.store,
    )
    .with_config(config)
    .with_pacer(fx.pacer.clone())
    .with_observer(observer.clone())
    .with_termination(FarewellPhrases::new(["never-said"]))
    .run("tests")
    .await;

    assert_eq!(outcome.rounds, 3);
    assert_eq!(fx.agent_a.calls()[0].0, "Topic is tests");
    assert_eq!(
        *observer.events.lock().unwrap(),
        vec![
            "round 0", "to Claude", "from Claude", "round 1", "to Gemini", "from Gemini",
            "round 2", "to Claude", "from Claude", "finish 3",
        ]
    );
}

#[tokio::test]
async fn test_closure_termination_on_first_round() {
    let mut fx = Fixture::new(&["[done]"], &[]);

    let outcome = ConversationOrchestrator::new(
        fx.agent_a.clone(),
        fx.agent_b.clone(),
        &mut fx.store,
    )
    .with_pacer(fx.pacer.clone())
    .with_termination(|text: &str| text == "[done]")
    .run("one shot")
    .await;

    assert_eq!(outcome.rounds, 1);
    assert_eq!(fx.store.len(), 1);
    assert!(fx.agent_b.calls().is_empty());
}

#[tokio::test]
async fn test_zero_round_limit_records_nothing() {
    let mut fx = Fixture::new(&[], &[]);

    let outcome = ConversationOrchestrator::new(
        fx.agent_a.clone(),
        fx.agent_b.clone(),
        &mut fx.store,
    )
    .with_config(OrchestratorConfig {
        max_rounds: 0,
        ..OrchestratorConfig::default()
    })
    .with_pacer(fx.pacer.clone())
    .run("nothing")
    .await;

    assert_eq!(outcome.rounds, 0);
    assert_eq!(outcome.reason, TerminationReason::RoundLimit);
    assert!(fx.store.is_empty());
}

#[tokio::test]
async fn test_write_failures_do_not_stop_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    // A non-empty directory at the transcript path makes every save fail.
    let path = tmp.path().join("conversation.json");
    std::fs::create_dir_all(path.join("blocker")).unwrap();

    let agent_a = ScriptedAgent::new(Sender::AgentA, &[]);
    let agent_b = ScriptedAgent::new(Sender::AgentB, &[]);
    let pacer = Arc::new(CountingPacer::default());
    let mut store = TranscriptStore::open(&path);

    let outcome = ConversationOrchestrator::new(agent_a.clone(), agent_b.clone(), &mut store)
        .with_pacer(pacer.clone())
        .run("unwritable")
        .await;

    assert_eq!(outcome.rounds, 10);
    assert_eq!(outcome.reason, TerminationReason::RoundLimit);
    assert_eq!(store.len(), 10);
    assert_eq!(agent_a.calls().len(), 5);
    assert_eq!(agent_b.calls().len(), 5);
    assert!(path.is_dir());

    // Once the path is writable again the next append flushes every turn.
    std::fs::remove_dir_all(&path).unwrap();
    store
        .append(Turn::new(Sender::AgentA, "after recovery", None))
        .unwrap();

    let on_disk = TranscriptStore::load(&path).unwrap();
    assert_eq!(on_disk.len(), 11);
    assert_eq!(on_disk, store.turns());
}
