//! Merge execution - effectful operations
//!
//! Takes the verdict produced by the pure evaluator and, when it allows,
//! performs the merge via the platform API.

use crate::eligibility::{Rejection, Verdict};
use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{MergeMethod, PullRequestSnapshot};
use tracing::{info, warn};

/// What happened to the pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The platform merged the PR
    Merged {
        /// SHA of the merge commit, when reported
        sha: Option<String>,
    },
    /// The merge call went through but the platform declined to merge
    Refused {
        /// Message from the platform
        message: Option<String>,
    },
    /// The verdict did not allow merging; no call was made
    Skipped(Rejection),
}

impl MergeOutcome {
    /// Check if the PR was merged
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

impl std::fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merged { sha } => {
                write!(f, "merged")?;
                if let Some(sha) = sha {
                    write!(f, " as {sha}")?;
                }
                Ok(())
            }
            Self::Refused { message } => {
                write!(f, "merge refused")?;
                if let Some(message) = message {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            Self::Skipped(rejection) => write!(f, "skipped: {rejection}"),
        }
    }
}

/// Execute the merge for a verdict (EFFECTFUL)
///
/// A rejected verdict is returned as [`MergeOutcome::Skipped`] without
/// touching the platform. The merge is pinned to the snapshot's head SHA.
pub async fn execute_merge(
    snapshot: &PullRequestSnapshot,
    verdict: &Verdict,
    platform: &dyn PlatformService,
    method: MergeMethod,
) -> Result<MergeOutcome> {
    if let Verdict::Rejected(rejection) = verdict {
        return Ok(MergeOutcome::Skipped(rejection.clone()));
    }

    info!(pr_number = snapshot.number, %method, "merging pull request");
    let result = platform
        .merge_pr(snapshot.number, &snapshot.head_sha, method)
        .await?;

    if result.merged {
        info!(pr_number = snapshot.number, sha = ?result.sha, "merged");
        Ok(MergeOutcome::Merged { sha: result.sha })
    } else {
        warn!(
            pr_number = snapshot.number,
            message = result.message.as_deref().unwrap_or(""),
            "platform refused merge"
        );
        Ok(MergeOutcome::Refused {
            message: result.message,
        })
    }
}
