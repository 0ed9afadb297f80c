//! Evaluate command - offline verdict from JSON files

use crate::cli::{print_snapshot_summary, print_verdict};
use anstream::println;
use automerge_bot::config::load_config;
use automerge_bot::eligibility::{CheckTotals, ReviewState, evaluate};
use automerge_bot::error::{Error, Result};
use automerge_bot::event::{PullRequestEvent, parse_check_runs, parse_reviews};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for the evaluate command
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    /// Event payload path
    pub event_path: PathBuf,
    /// Configuration path
    pub config_path: PathBuf,
    /// Own check-run name to exclude
    pub workflow: Option<String>,
    /// Review list JSON; no reviews when absent
    pub reviews_path: Option<PathBuf>,
    /// Check runs JSON; no check runs when absent
    pub check_runs_path: Option<PathBuf>,
    /// Emit JSON instead of the human summary
    pub json: bool,
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::Event(format!("failed to read {}: {e}", path.display())))
}

/// Run the evaluate command
pub fn run_evaluate(options: &EvaluateOptions) -> Result<()> {
    let event = PullRequestEvent::from_path(&options.event_path)?;
    let config = load_config(&options.config_path)?;

    let reviews = match options.reviews_path {
        Some(ref path) => parse_reviews(&read_input(path)?)?,
        None => Vec::new(),
    };
    let check_runs = match options.check_runs_path {
        Some(ref path) => parse_check_runs(&read_input(path)?)?,
        None => Vec::new(),
    };

    let snapshot = event
        .snapshot()
        .with_reviews(ReviewState::reduce(&reviews))
        .with_checks(CheckTotals::tally(&check_runs, options.workflow.as_deref()));

    let verdict = evaluate(&snapshot, &config);

    if options.json {
        let json = serde_json::to_string_pretty(&verdict)
            .map_err(|e| Error::Internal(format!("failed to serialize verdict: {e}")))?;
        println!("{json}");
    } else {
        print_snapshot_summary(&snapshot);
        print_verdict(&verdict);
    }

    Ok(())
}
