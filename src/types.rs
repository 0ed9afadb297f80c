//! Core types for automerge-bot

use crate::eligibility::{CheckTotals, ReviewState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// A reviewer's verdict on a pull request
///
/// Anything other than `APPROVED` or `COMMENTED` blocks merging. The raw
/// state is kept in [`ReviewVerdict::Other`] so rejection messages can name it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewVerdict {
    /// Reviewer approved the changes
    Approved,
    /// Reviewer left comments without approving or blocking
    Commented,
    /// `CHANGES_REQUESTED`, `DISMISSED`, `PENDING` or an unrecognized state
    Other(String),
}

impl ReviewVerdict {
    /// Whether this verdict lets the review gate pass on its own
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Whether this verdict vetoes the merge
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl From<&str> for ReviewVerdict {
    fn from(state: &str) -> Self {
        match state {
            "APPROVED" => Self::Approved,
            "COMMENTED" => Self::Commented,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ReviewVerdict {
    fn from(state: String) -> Self {
        match state.as_str() {
            "APPROVED" => Self::Approved,
            "COMMENTED" => Self::Commented,
            _ => Self::Other(state),
        }
    }
}

impl std::fmt::Display for ReviewVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "APPROVED"),
            Self::Commented => write!(f, "COMMENTED"),
            Self::Other(state) => write!(f, "{state}"),
        }
    }
}

/// A single submitted review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Login of the reviewer
    pub reviewer: String,
    /// When the review was submitted
    pub submitted_at: DateTime<Utc>,
    /// The verdict carried by the review
    pub verdict: ReviewVerdict,
}

impl Review {
    /// Create a review from its parts
    pub fn new(
        reviewer: impl Into<String>,
        submitted_at: DateTime<Utc>,
        verdict: impl Into<ReviewVerdict>,
    ) -> Self {
        Self {
            reviewer: reviewer.into(),
            submitted_at,
            verdict: verdict.into(),
        }
    }
}

/// A CI check run attached to the head commit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckRun {
    /// Check run name (the job name for GitHub Actions)
    pub name: String,
    /// `queued`, `in_progress` or `completed`
    pub status: String,
    /// `success`, `failure`, ... once completed
    #[serde(default)]
    pub conclusion: Option<String>,
}

impl CheckRun {
    /// Whether the run has finished
    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }

    /// Whether the run concluded successfully
    pub fn is_success(&self) -> bool {
        self.conclusion.as_deref() == Some("success")
    }
}

/// The pull request under evaluation
///
/// Built fresh from one event payload per evaluation cycle. Reduced review
/// and check state is attached by value through [`with_reviews`] and
/// [`with_checks`]; nothing is carried over between cycles.
///
/// [`with_reviews`]: Self::with_reviews
/// [`with_checks`]: Self::with_checks
#[derive(Debug, Clone, Default)]
pub struct PullRequestSnapshot {
    /// PR number
    pub number: u64,
    /// Label names currently applied
    pub labels: BTreeSet<String>,
    /// Reviewers whose review request is still outstanding
    pub requested_reviewer_count: usize,
    /// Latest review per reviewer
    pub reviews: ReviewState,
    /// Check-run tally for the head commit
    pub checks: CheckTotals,
    /// Head commit SHA
    pub head_sha: String,
    /// Head branch name
    pub branch_name: String,
    /// Owner of the base repository
    pub repo_owner: String,
    /// Name of the base repository
    pub repo_name: String,
    /// ID of the head repository (`None` once a fork has been deleted)
    pub head_repo_id: Option<u64>,
    /// ID of the base repository
    pub base_repo_id: u64,
}

impl PullRequestSnapshot {
    /// Replace the review state with a freshly reduced one
    #[must_use]
    pub fn with_reviews(mut self, reviews: ReviewState) -> Self {
        self.reviews = reviews;
        self
    }

    /// Replace the check totals with a freshly reduced tally
    #[must_use]
    pub const fn with_checks(mut self, checks: CheckTotals) -> Self {
        self.checks = checks;
        self
    }

    /// Whether the review gate is satisfied
    ///
    /// The failing rule is logged at debug level; use
    /// [`evaluate`](crate::eligibility::evaluate) to get it as a value.
    pub fn is_review_complete(&self, required: bool) -> bool {
        self.reviews
            .ensure_complete(required, self.requested_reviewer_count)
            .inspect_err(|rejection| {
                debug!(pr_number = self.number, %rejection, "review gate not satisfied");
            })
            .is_ok()
    }

    /// Whether the check gate is satisfied
    ///
    /// Logs the failing rule like [`is_review_complete`](Self::is_review_complete).
    pub fn is_checks_complete(&self, enabled: bool) -> bool {
        self.checks
            .ensure_complete(enabled)
            .inspect_err(|rejection| {
                debug!(pr_number = self.number, %rejection, "check gate not satisfied");
            })
            .is_ok()
    }

    /// Whether the head branch lives in a different repository than the base
    pub fn is_from_fork(&self) -> bool {
        self.head_repo_id != Some(self.base_repo_id)
    }
}

/// Repository coordinates for platform calls
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// REST API base URL (e.g. `https://api.github.com`)
    pub api_base: String,
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Squash all commits into one
    #[default]
    Squash,
    /// Create a merge commit
    Merge,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}
