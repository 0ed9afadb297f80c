//! Gather phase - fetch remote state and reduce it onto a snapshot

use crate::eligibility::{CheckTotals, ReviewState};
use crate::error::Result;
use crate::event::PullRequestEvent;
use crate::platform::PlatformService;
use crate::types::PullRequestSnapshot;
use tracing::debug;

/// Build the snapshot for `event` with reviews and checks filled in
///
/// Check runs named `excluded_run` (the bot's own workflow) are not counted.
pub async fn gather_snapshot(
    event: &PullRequestEvent,
    platform: &dyn PlatformService,
    excluded_run: Option<&str>,
) -> Result<PullRequestSnapshot> {
    let snapshot = event.snapshot();

    let reviews = platform.list_reviews(snapshot.number).await?;
    let check_runs = platform.list_check_runs(&snapshot.head_sha).await?;
    debug!(
        pr_number = snapshot.number,
        action = event.action.as_deref().unwrap_or("unknown"),
        reviews = reviews.len(),
        check_runs = check_runs.len(),
        "gathered remote state"
    );

    let review_state = ReviewState::reduce(&reviews);
    let check_totals = CheckTotals::tally(&check_runs, excluded_run);

    Ok(snapshot
        .with_reviews(review_state)
        .with_checks(check_totals))
}
