//! Command implementations for the `automerge` binary

mod context;
mod evaluate;
mod run;
mod style;

pub use evaluate::{EvaluateOptions, run_evaluate};
pub use run::{RunOptions, run_automerge};

use anstream::println;
use automerge_bot::eligibility::Verdict;
use automerge_bot::types::PullRequestSnapshot;
use style::{Stylize, check, cross};

/// Print what the evaluator is about to look at
pub fn print_snapshot_summary(snapshot: &PullRequestSnapshot) {
    println!(
        "{} {}",
        format!("PR #{}", snapshot.number).emphasis(),
        format!(
            "({}) in {}/{}",
            snapshot.branch_name, snapshot.repo_owner, snapshot.repo_name
        )
        .muted()
    );

    let labels = if snapshot.labels.is_empty() {
        "(none)".to_string()
    } else {
        snapshot
            .labels
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("  Labels:  {}", labels.accent());
    println!(
        "  Reviews: {} reviewer(s), {} pending request(s)",
        snapshot.reviews.len(),
        snapshot.requested_reviewer_count
    );
    for (reviewer, entry) in snapshot.reviews.iter() {
        println!("    - {reviewer}: {}", entry.verdict.to_string().muted());
    }
    println!(
        "  Checks:  {}/{} completed, {}/{} successful",
        snapshot.checks.completed,
        snapshot.checks.total,
        snapshot.checks.success,
        snapshot.checks.total
    );
    if snapshot.is_from_fork() {
        println!("  {}", "Head branch is in a different repository".warn());
    }
    println!();
}

/// Print the verdict line
pub fn print_verdict(verdict: &Verdict) {
    match verdict {
        Verdict::Mergeable => println!("{} {}", check(), verdict.success()),
        Verdict::Rejected(_) => println!("{} {}", cross(), verdict.warn()),
    }
}
