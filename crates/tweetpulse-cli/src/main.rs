mod analyze;
mod fetch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tweetpulse_core::{AppConfig, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "tweetpulse")]
#[command(about = "Collect English tweets for a topic and tally their emotions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch English tweets for a topic and write them to a JSON file
    Fetch {
        /// Topic to search for, by keyword and then as a hashtag
        topic: Option<String>,

        /// Number of tweets to collect (defaults to `TWEETPULSE_TARGET_COUNT`)
        #[arg(long)]
        count: Option<usize>,

        /// Output file (defaults to `TWEETPULSE_OUTPUT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Tally emotions in a previously fetched tweet file
    Analyze {
        /// Tweet file to read (defaults to `TWEETPULSE_OUTPUT_PATH`)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Topic label to include in the report
        #[arg(long)]
        topic: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(tweetpulse_core::log_level_from_env()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli.command, tweetpulse_core::load_app_config_from_env).await;

    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "command failed");
    }
    result
}

/// Dispatch one command. Command-line input is validated before
/// `load_config` runs.
async fn run<L>(command: Commands, load_config: L) -> anyhow::Result<()>
where
    L: FnOnce() -> Result<AppConfig, ConfigError>,
{
    match command {
        Commands::Fetch {
            topic,
            count,
            output,
        } => {
            let topic = fetch::resolve_topic(topic.as_deref())?;
            let config = load_config()?;
            fetch::run_fetch(&config, topic, count, output.as_deref()).await
        }
        Commands::Analyze { input, topic } => {
            let config = load_config()?;
            analyze::run_analyze(&config, input.as_deref(), topic).await
        }
    }
}
