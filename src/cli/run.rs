//! Run command - evaluate the event's pull request and merge it

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, cross};
use crate::cli::{print_snapshot_summary, print_verdict};
use anstream::println;
use automerge_bot::eligibility::evaluate;
use automerge_bot::error::Result;
use automerge_bot::merge::{MergeOutcome, execute_merge, gather_snapshot};
use std::path::PathBuf;

/// Options for the run command
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Event payload path
    pub event_path: PathBuf,
    /// Configuration path
    pub config_path: PathBuf,
    /// Own check-run name to exclude
    pub workflow: Option<String>,
    /// Explicit token
    pub token: Option<String>,
    /// API base URL override
    pub api_url: Option<String>,
    /// Dry run - evaluate without merging
    pub dry_run: bool,
}

/// Run the merge pipeline for one event
pub async fn run_automerge(options: &RunOptions) -> Result<()> {
    // =========================================================================
    // Phase 1: GATHER - event, config, reviews, check runs
    // =========================================================================

    let ctx = CommandContext::new(
        &options.event_path,
        &options.config_path,
        options.token.as_deref(),
        options.api_url.as_deref(),
    )
    .await?;

    let snapshot = gather_snapshot(
        &ctx.event,
        ctx.platform.as_ref(),
        options.workflow.as_deref(),
    )
    .await?;
    print_snapshot_summary(&snapshot);

    // =========================================================================
    // Phase 2: EVALUATE - pure
    // =========================================================================

    let verdict = evaluate(&snapshot, &ctx.config);
    print_verdict(&verdict);

    if options.dry_run {
        println!("{}", "Dry run - not merging.".muted());
        return Ok(());
    }

    // =========================================================================
    // Phase 3: EXECUTE - merge call
    // =========================================================================

    let outcome = execute_merge(
        &snapshot,
        &verdict,
        ctx.platform.as_ref(),
        ctx.config.merge_method,
    )
    .await?;

    match outcome {
        MergeOutcome::Merged { .. } => println!("{} {}", check(), outcome.success()),
        MergeOutcome::Refused { .. } => println!("{} {}", cross(), outcome.warn()),
        MergeOutcome::Skipped(_) => println!("{}", "Nothing to merge.".muted()),
    }

    Ok(())
}
