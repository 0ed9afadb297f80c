//! Platform services for GitHub
//!
//! Provides the fetch and merge operations the merge pipeline needs, behind a
//! trait so the pipeline can run against a mock.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{CheckRun, MergeMethod, MergeResult, PlatformConfig, Review};
use async_trait::async_trait;

/// Platform service trait for pull request operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List every submitted review on a PR
    ///
    /// Reviews that have not been submitted yet (no timestamp) are omitted.
    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>>;

    /// List every check run attached to a commit
    async fn list_check_runs(&self, git_ref: &str) -> Result<Vec<CheckRun>>;

    /// Merge a PR with the specified method
    ///
    /// `head_sha` guards the merge: it fails if the head moved since the
    /// snapshot was taken.
    async fn merge_pr(
        &self,
        pr_number: u64,
        head_sha: &str,
        method: MergeMethod,
    ) -> Result<MergeResult>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
