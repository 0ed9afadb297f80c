//! Review reduction - latest review per reviewer

use super::verdict::{Rejection, RejectionReason};
use crate::types::{Review, ReviewVerdict};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Latest review of a single reviewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    /// When the review was submitted
    pub submitted_at: DateTime<Utc>,
    /// The verdict of that review
    pub verdict: ReviewVerdict,
}

/// Reviews collapsed to one entry per reviewer
///
/// Ordering of the input does not matter: an entry is only replaced by a
/// review with a strictly later `submitted_at`, so folding the same events
/// again (or a superset of them) converges on the same state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewState {
    entries: BTreeMap<String, ReviewEntry>,
}

impl ReviewState {
    /// Reduce a list of reviews into a fresh state
    pub fn reduce<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Self {
        Self::default().apply(reviews)
    }

    /// Fold more reviews into this state
    #[must_use]
    pub fn apply<'a>(mut self, reviews: impl IntoIterator<Item = &'a Review>) -> Self {
        for review in reviews {
            match self.entries.get(&review.reviewer) {
                Some(existing) if review.submitted_at <= existing.submitted_at => {}
                _ => {
                    self.entries.insert(
                        review.reviewer.clone(),
                        ReviewEntry {
                            submitted_at: review.submitted_at,
                            verdict: review.verdict.clone(),
                        },
                    );
                }
            }
        }
        debug!(reviewers = self.entries.len(), "reduced reviews");
        self
    }

    /// Latest review of `reviewer`, if any
    pub fn get(&self, reviewer: &str) -> Option<&ReviewEntry> {
        self.entries.get(reviewer)
    }

    /// Iterate reviewers in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReviewEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct reviewers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nobody has reviewed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the review gate, stopping at the first failing rule
    ///
    /// Outstanding review requests block regardless of existing approvals,
    /// a single blocking review vetoes any number of approvals, and comments
    /// alone never satisfy the gate.
    pub fn ensure_complete(
        &self,
        required: bool,
        requested_reviewer_count: usize,
    ) -> Result<(), Rejection> {
        if !required {
            return Ok(());
        }

        if requested_reviewer_count > 0 {
            return Err(Rejection::with_detail(
                RejectionReason::OutstandingReviewRequests,
                format!("{requested_reviewer_count} pending"),
            ));
        }

        if self.is_empty() {
            return Err(Rejection::new(RejectionReason::NoReviews));
        }

        if let Some((reviewer, entry)) = self.iter().find(|(_, e)| e.verdict.is_blocking()) {
            return Err(Rejection::with_detail(
                RejectionReason::NonApprovedReview,
                format!("{reviewer}: {}", entry.verdict),
            ));
        }

        if self.iter().any(|(_, e)| e.verdict.is_approved()) {
            Ok(())
        } else {
            Err(Rejection::new(RejectionReason::NoApprovingReview))
        }
    }
}

impl<'a> FromIterator<&'a Review> for ReviewState {
    fn from_iter<I: IntoIterator<Item = &'a Review>>(iter: I) -> Self {
        Self::reduce(iter)
    }
}
