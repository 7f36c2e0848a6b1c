use aibridge_config::Config;
use aibridge_transcript::TranscriptStore;

/// Input parameters for the History command strategy.
#[derive(Debug, Clone)]
pub struct HistoryInput {
    /// Only show the most recent N turns
    pub last: Option<usize>,
    pub config: Config,
}

/// Strategy for printing the stored transcript.
#[derive(Debug, Clone, Copy)]
pub struct HistoryStrategy;

impl super::CommandStrategy for HistoryStrategy {
    type Input = HistoryInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let path = input.config.storage.transcript_path();
        let turns = TranscriptStore::load(&path)?;

        if turns.is_empty() {
            println!("No turns recorded at {}", path.display());
            return Ok(());
        }

        let start = input
            .last
            .map_or(0, |n| turns.len().saturating_sub(n));

        println!("=== Transcript: {} ({} turns) ===", path.display(), turns.len());
        for (index, turn) in turns.iter().enumerate().skip(start) {
            println!(
                "\n#{} [{}] {}",
                index + 1,
                turn.timestamp.format("%Y-%m-%d %H:%M:%S"),
                turn.sender
            );
            println!("  > {}", turn.message);
            match &turn.response {
                Some(response) => println!("  < {response}"),
                None => println!("  < (no response)"),
            }
        }

        Ok(())
    }
}
