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

use aibridge_config::Config;
use clap::{Args, Parser};
use tracing::info;

mod command;
mod console;
mod logging;

use command::{
    CommandStrategy, HistoryInput, HistoryStrategy, InfoStrategy, InitStrategy, TalkInput,
    TalkStrategy, VersionStrategy,
};

/// Every positional word belongs to the topic, so maintenance actions are
/// flags rather than subcommands.
#[derive(Parser)]
#[command(name = "aibridge")]
#[command(about = "Let Claude and Gemini talk to each other", long_about = None)]
struct Cli {
    /// Conversation topic (remaining words are joined with spaces)
    #[arg(trailing_var_arg = true, conflicts_with = "action")]
    topic: Vec<String>,

    /// Override the maximum number of rounds
    #[arg(short = 'r', long)]
    max_rounds: Option<usize>,

    /// Do not pause between rounds
    #[arg(long)]
    no_pause: bool,

    #[command(flatten)]
    action: Action,

    /// With --history, only show the most recent N turns
    #[arg(short = 'n', long, requires = "history")]
    last: Option<usize>,
}

#[derive(Args)]
#[group(id = "action", multiple = false)]
#[allow(clippy::struct_excessive_bools)]
struct Action {
    /// Initialize configuration
    #[arg(long)]
    init: bool,
    /// Show effective configuration
    #[arg(long)]
    info: bool,
    /// Print the stored transcript
    #[arg(long)]
    history: bool,
    /// Show version
    #[arg(long)]
    version: bool,
}

enum Command {
    Talk,
    Init,
    Info,
    History { last: Option<usize> },
    Version,
}

impl Cli {
    const fn selected(&self) -> Command {
        let action = &self.action;
        if action.init {
            Command::Init
        } else if action.info {
            Command::Info
        } else if action.history {
            Command::History { last: self.last }
        } else if action.version {
            Command::Version
        } else {
            Command::Talk
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.selected() {
        Command::Init => return InitStrategy.execute(()).await,
        Command::Version => return VersionStrategy.execute(()).await,
        _ => {}
    }

    let config = Config::load()?;
    let log_path = config.storage.log_path();
    logging::init(&log_path)?;

    match cli.selected() {
        Command::Info => InfoStrategy.execute(config).await,
        Command::History { last } => {
            HistoryStrategy
                .execute(HistoryInput { last, config })
                .await
        }
        Command::Init | Command::Version => Ok(()),
        Command::Talk => {
            info!("Log file: {}", log_path.display());
            TalkStrategy
                .execute(TalkInput {
                    topic: cli.topic,
                    max_rounds: cli.max_rounds,
                    no_pause: cli.no_pause,
                    config,
                    log_path,
                })
                .await
        }
    }
}
