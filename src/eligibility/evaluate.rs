//! Merge eligibility decision (PURE - no I/O, easily testable)

use super::verdict::{Rejection, RejectionReason, Verdict};
use crate::config::MergeConfig;
use crate::types::PullRequestSnapshot;
use tracing::info;

/// Decide whether `snapshot` may be merged under `config`
///
/// Rules are checked in order and evaluation stops at the first failure:
/// 1. every required label is applied
/// 2. no blocking label is applied
/// 3. the review gate passes (if `review_required`)
/// 4. the check gate passes (if `checks_enabled`)
///
/// The failing rule is logged once and returned in the verdict.
pub fn evaluate(snapshot: &PullRequestSnapshot, config: &MergeConfig) -> Verdict {
    let verdict = Verdict::from(check_rules(snapshot, config));
    match verdict {
        Verdict::Mergeable => info!(pr_number = snapshot.number, "pull request is mergeable"),
        Verdict::Rejected(ref rejection) => info!(
            pr_number = snapshot.number,
            reason = %rejection.reason,
            detail = rejection.detail.as_deref().unwrap_or(""),
            "merge rejected"
        ),
    }
    verdict
}

/// Boolean form of [`evaluate`]
pub fn can_merge(snapshot: &PullRequestSnapshot, config: &MergeConfig) -> bool {
    evaluate(snapshot, config).is_mergeable()
}

fn check_rules(snapshot: &PullRequestSnapshot, config: &MergeConfig) -> Result<(), Rejection> {
    if let Some(missing) = config
        .required_labels
        .iter()
        .find(|label| !snapshot.labels.contains(*label))
    {
        return Err(Rejection::with_detail(
            RejectionReason::MissingRequiredLabel,
            missing.as_str(),
        ));
    }

    if let Some(blocking) = config
        .blocking_labels
        .iter()
        .find(|label| snapshot.labels.contains(*label))
    {
        return Err(Rejection::with_detail(
            RejectionReason::BlockingLabelPresent,
            blocking.as_str(),
        ));
    }

    snapshot
        .reviews
        .ensure_complete(config.review_required, snapshot.requested_reviewer_count)?;
    snapshot.checks.ensure_complete(config.checks_enabled)
}
