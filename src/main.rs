use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod client;
mod concepts;
mod config;
mod drafts;
mod error;
mod models;
mod output;
mod shell;
mod terminal;
mod wizard;

use crate::client::EvaluationClient;
use crate::config::{BASE_URL_ENV, Config};
use crate::drafts::DraftStore;
use crate::models::Scalar;
use crate::output::OutputFormat;
use crate::terminal::TerminalSurface;
use crate::wizard::{Session, Wizard};

/// LLM Feedback Survey - Rate model outputs and submit feedback to the evaluation API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Evaluation API base URL (overrides the config file and API_BASE_URL)
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Directory for draft files
    #[arg(long, global = true)]
    drafts_dir: Option<PathBuf>,

    /// Verbose output - log each API request and draft write
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive survey (default)
    Run,
    /// List active evaluations
    List {
        /// Output format: plain or json
        #[arg(short, long, default_value = "plain")]
        output: OutputFormat,
    },
    /// Show the model outputs of one evaluation
    Show {
        /// Evaluation ID
        id: String,

        /// Output format: plain or json
        #[arg(short, long, default_value = "plain")]
        output: OutputFormat,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(args.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(args.config.as_deref())?;
    let env_url = std::env::var(BASE_URL_ENV).ok();
    let base_url = config.resolve_base_url(args.api_base_url.as_deref(), env_url.as_deref());
    let client = EvaluationClient::new(base_url);
    info!(base_url = client.base_url(), "using evaluation API");

    match args.command.unwrap_or(Command::Run) {
        Command::Run => {
            let drafts_dir = args.drafts_dir.unwrap_or(config.drafts_dir);
            let drafts = DraftStore::new(drafts_dir);
            info!(drafts_dir = %drafts.dir().display(), "drafts directory");

            let wizard = Wizard::new(client, drafts);
            let mut session = Session::new();
            let mut surface = TerminalSurface::new();
            shell::run(&wizard, &mut session, &mut surface).await?;
        }
        Command::List { output } => {
            let evaluations = client
                .list_active_evaluations()
                .await
                .context("Failed to fetch evaluations")?;
            output::print_evaluations(&evaluations, output);
        }
        Command::Show { id, output } => {
            let id = parse_evaluation_id(&id);
            let models = client
                .get_evaluation(&id)
                .await
                .with_context(|| format!("Failed to fetch evaluation {}", id))?;
            output::print_models(&models, output);
        }
    }

    Ok(())
}

/// Request and draft-write logs are at debug level, so `--verbose` opens that
fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Numeric ids are sent as numbers, anything else as text
fn parse_evaluation_id(raw: &str) -> Scalar {
    match raw.parse::<i64>() {
        Ok(n) => Scalar::Number(n.into()),
        Err(_) => Scalar::Text(raw.to_string()),
    }
}
