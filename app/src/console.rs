//! Live console view of a running conversation.

use aibridge_conversation::{ConversationObserver, ConversationOutcome, TerminationReason};
use aibridge_core::Sender;
use chrono::Local;

const RULE_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleObserver;

impl ConsoleObserver {
    fn display_message(label: &str, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        println!("\n[{timestamp}] {label}:");
        println!("{message}");
        println!("{}", "-".repeat(RULE_WIDTH));
    }
}

impl ConversationObserver for ConsoleObserver {
    fn on_start(&self, topic: &str) {
        println!("\n🤖 Starting a conversation between Claude and Gemini on: {topic}");
        println!("{}", "=".repeat(RULE_WIDTH));
    }

    fn on_round(&self, round: usize) {
        println!("\n🔄 Round {}", round + 1);
    }

    fn on_outgoing(&self, to: Sender, message: &str) {
        Self::display_message(&format!("Sending to {to}"), message);
    }

    fn on_response(&self, from: Sender, response: &str) {
        Self::display_message(&format!("{from} replied"), response);
    }

    fn on_finish(&self, outcome: &ConversationOutcome) {
        match outcome.reason {
            TerminationReason::Farewell { sender } => {
                println!("\n✅ Conversation ended by {sender}");
            }
            TerminationReason::RoundLimit => {
                println!("\n⏹  Reached the round limit after {} rounds", outcome.rounds);
            }
        }
    }
}
