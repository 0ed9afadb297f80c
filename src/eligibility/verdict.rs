//! Verdict types produced by the evaluator

use serde::Serialize;

/// Why a pull request was judged not mergeable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// A label listed in `labels` is not applied
    MissingRequiredLabel,
    /// A label listed in `blocking_labels` is applied
    BlockingLabelPresent,
    /// Review requests are still pending
    OutstandingReviewRequests,
    /// Nobody has reviewed yet
    NoReviews,
    /// Some reviewer's latest review is neither approving nor a comment
    NonApprovedReview,
    /// Only comments, no approval
    NoApprovingReview,
    /// No check runs were counted
    ZeroChecks,
    /// More than one check is unfinished or unsuccessful
    ChecksIncomplete,
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::MissingRequiredLabel => "missing required label",
            Self::BlockingLabelPresent => "blocking label present",
            Self::OutstandingReviewRequests => "outstanding review requests",
            Self::NoReviews => "no reviews",
            Self::NonApprovedReview => "non-approved review present",
            Self::NoApprovingReview => "no approving review",
            Self::ZeroChecks => "zero checks",
            Self::ChecksIncomplete => "checks incomplete",
        };
        f.write_str(text)
    }
}

/// A failed rule with optional context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Which rule failed
    pub reason: RejectionReason,
    /// Context such as the offending label or reviewer
    pub detail: Option<String>,
}

impl Rejection {
    /// Rejection without further detail
    pub const fn new(reason: RejectionReason) -> Self {
        Self {
            reason,
            detail: None,
        }
    }

    /// Rejection carrying a detail string
    pub fn with_detail(reason: RejectionReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: Some(detail.into()),
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)?;
        if let Some(ref detail) = self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

/// Outcome of one evaluation cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Every rule passed
    Mergeable,
    /// The first rule that failed
    Rejected(Rejection),
}

impl Verdict {
    /// Whether the pull request may be merged
    pub const fn is_mergeable(&self) -> bool {
        matches!(self, Self::Mergeable)
    }

    /// The rejection, if any
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Mergeable => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

impl From<Result<(), Rejection>> for Verdict {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Self::Mergeable,
            Err(rejection) => Self::Rejected(rejection),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mergeable => write!(f, "mergeable"),
            Self::Rejected(rejection) => write!(f, "not mergeable: {rejection}"),
        }
    }
}
