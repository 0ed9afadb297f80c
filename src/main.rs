//! automerge - merge pull requests once labels, reviews and checks allow it

mod cli;

use anyhow::Context;
use automerge_bot::config::DEFAULT_CONFIG_PATH;
use automerge_bot::telemetry::init_tracing;
use clap::{Args, Parser, Subcommand};
use cli::{EvaluateOptions, RunOptions};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "automerge",
    version,
    about = "Merge pull requests once labels, reviews and checks allow it"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate the pull request of a GitHub event and merge it if eligible
    Run(RunArgs),
    /// Evaluate offline from JSON files without contacting GitHub
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Path to the event payload JSON
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event: PathBuf,

    /// Path to the merge configuration
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Name of the bot's own check run, excluded from the check tally
    #[arg(long, env = "GITHUB_WORKFLOW")]
    workflow: Option<String>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// GitHub token (falls back to GITHUB_TOKEN, GH_TOKEN, then `gh auth token`)
    #[arg(long)]
    token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Evaluate but do not merge
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Review list JSON (as returned by the pull request reviews API)
    #[arg(long)]
    reviews: Option<PathBuf>,

    /// Check runs JSON (as returned by the commit check-runs API)
    #[arg(long)]
    check_runs: Option<PathBuf>,

    /// Print the verdict as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { Level::DEBUG } else { Level::INFO });

    match cli.command {
        Command::Run(args) => {
            let options = RunOptions {
                event_path: args.common.event,
                config_path: args.common.config,
                workflow: args.common.workflow,
                token: args.token,
                api_url: args.api_url,
                dry_run: args.dry_run,
            };
            cli::run_automerge(&options)
                .await
                .context("automerge run failed")?;
        }
        Command::Evaluate(args) => {
            let options = EvaluateOptions {
                event_path: args.common.event,
                config_path: args.common.config,
                workflow: args.common.workflow,
                reviews_path: args.reviews,
                check_runs_path: args.check_runs,
                json: args.json,
            };
            cli::run_evaluate(&options).context("evaluation failed")?;
        }
    }

    Ok(())
}
