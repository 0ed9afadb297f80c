//! GitHub event payloads
//!
//! Deserializes the JSON GitHub hands to a workflow run (`GITHUB_EVENT_PATH`)
//! and the raw review / check-run listings, and turns them into the types the
//! eligibility engine works on.

use crate::error::{Error, Result};
use crate::types::{CheckRun, PullRequestSnapshot, Review};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A webhook event carrying a pull request
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    /// Event action (`opened`, `labeled`, `submitted`, ...)
    #[serde(default)]
    pub action: Option<String>,
    /// The pull request the event is about
    pub pull_request: PullRequestPayload,
    /// Base repository
    pub repository: RepositoryPayload,
}

/// Pull request object inside an event
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    /// PR number
    pub number: u64,
    /// Applied labels
    #[serde(default)]
    pub labels: Vec<LabelPayload>,
    /// Users with a pending review request
    #[serde(default)]
    pub requested_reviewers: Vec<UserPayload>,
    /// Head branch
    pub head: RefPayload,
    /// Base branch
    pub base: RefPayload,
}

/// A label
#[derive(Debug, Clone, Deserialize)]
pub struct LabelPayload {
    /// Label name
    pub name: String,
}

/// A GitHub user
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    /// Login name
    pub login: String,
}

/// One side (head or base) of a pull request
#[derive(Debug, Clone, Deserialize)]
pub struct RefPayload {
    /// Branch name
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Commit SHA
    pub sha: String,
    /// Repository holding the branch (`null` once a fork is deleted)
    #[serde(default)]
    pub repo: Option<RepoIdPayload>,
}

/// Repository reference carrying only its id
#[derive(Debug, Clone, Deserialize)]
pub struct RepoIdPayload {
    /// Repository id
    pub id: u64,
}

/// Repository object inside an event
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    /// Repository name
    pub name: String,
    /// Repository owner
    pub owner: UserPayload,
}

impl PullRequestEvent {
    /// Parse an event from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| Error::Event(format!("invalid JSON: {e}")))?;

        if value.get("pull_request").is_none_or(serde_json::Value::is_null) {
            return Err(Error::Event(
                "event payload has no pull_request".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| Error::Event(format!("malformed pull request event: {e}")))
    }

    /// Read and parse an event file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Event(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Build the snapshot for this event, with no reviews or checks yet
    pub fn snapshot(&self) -> PullRequestSnapshot {
        let pr = &self.pull_request;
        let snapshot = PullRequestSnapshot {
            number: pr.number,
            labels: pr.labels.iter().map(|l| l.name.clone()).collect(),
            requested_reviewer_count: pr.requested_reviewers.len(),
            head_sha: pr.head.sha.clone(),
            branch_name: pr.head.ref_name.clone(),
            repo_owner: self.repository.owner.login.clone(),
            repo_name: self.repository.name.clone(),
            head_repo_id: pr.head.repo.as_ref().map(|r| r.id),
            base_repo_id: pr.base.repo.as_ref().map_or(0, |r| r.id),
            ..PullRequestSnapshot::default()
        };
        debug!(
            pr_number = snapshot.number,
            labels = snapshot.labels.len(),
            requested_reviewers = snapshot.requested_reviewer_count,
            "built snapshot from event"
        );
        snapshot
    }
}

/// A review as listed by `GET /repos/{owner}/{repo}/pulls/{n}/reviews`
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewPayload {
    /// Reviewer (`null` for deleted accounts)
    #[serde(default)]
    pub user: Option<UserPayload>,
    /// Submission time (`null` for pending reviews)
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Review state (`APPROVED`, `COMMENTED`, ...)
    #[serde(default)]
    pub state: Option<String>,
}

impl ReviewPayload {
    /// Convert to a [`Review`], dropping reviews without a user, timestamp or state
    ///
    /// Both raw listings and octocrab reviews go through here, so the raw
    /// state string always ends up in [`ReviewVerdict::Other`](crate::types::ReviewVerdict::Other).
    pub fn into_review(self) -> Option<Review> {
        let user = self.user?;
        let submitted_at = self.submitted_at?;
        let state = self.state?;
        Some(Review::new(user.login, submitted_at, state))
    }
}

/// Response of `GET /repos/{owner}/{repo}/commits/{ref}/check-runs`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRunsPayload {
    /// Total runs across all pages
    pub total_count: usize,
    /// Runs on this page
    pub check_runs: Vec<CheckRun>,
}

/// Parse a review listing, dropping unsubmitted reviews
pub fn parse_reviews(content: &str) -> Result<Vec<Review>> {
    let payloads: Vec<ReviewPayload> = serde_json::from_str(content)
        .map_err(|e| Error::Event(format!("malformed review list: {e}")))?;
    Ok(payloads
        .into_iter()
        .filter_map(ReviewPayload::into_review)
        .collect())
}

/// Parse a check-runs listing
///
/// Accepts either the API response object or a bare array of runs.
pub fn parse_check_runs(content: &str) -> Result<Vec<CheckRun>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Listing {
        Response(CheckRunsPayload),
        Runs(Vec<CheckRun>),
    }

    let listing: Listing = serde_json::from_str(content)
        .map_err(|e| Error::Event(format!("malformed check-run list: {e}")))?;
    Ok(match listing {
        Listing::Response(response) => response.check_runs,
        Listing::Runs(runs) => runs,
    })
}
