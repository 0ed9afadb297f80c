//! Check-run reduction - totals for the head commit

use super::verdict::{Rejection, RejectionReason};
use crate::types::CheckRun;
use tracing::debug;

/// Aggregate counts over the check runs of one commit
///
/// `completed` and `success` are counted independently: a run can be
/// completed with a failing conclusion. Both never exceed `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckTotals {
    /// Runs counted
    pub total: usize,
    /// Runs with status `completed`
    pub completed: usize,
    /// Runs with conclusion `success`
    pub success: usize,
}

impl CheckTotals {
    /// Tally check runs, skipping the run named `excluded` (the bot's own run)
    pub fn tally<'a>(runs: impl IntoIterator<Item = &'a CheckRun>, excluded: Option<&str>) -> Self {
        let mut totals = Self::default();
        for run in runs {
            if excluded == Some(run.name.as_str()) {
                debug!(name = %run.name, "skipping own check run");
                continue;
            }
            totals.total += 1;
            if run.is_completed() {
                totals.completed += 1;
            }
            if run.is_success() {
                totals.success += 1;
            }
        }
        debug!(
            total = totals.total,
            completed = totals.completed,
            success = totals.success,
            "tallied check runs"
        );
        totals
    }

    /// Check the CI gate
    ///
    /// One run may be unfinished or unsuccessful without blocking.
    pub fn ensure_complete(&self, enabled: bool) -> Result<(), Rejection> {
        if !enabled {
            return Ok(());
        }

        if self.total == 0 {
            return Err(Rejection::new(RejectionReason::ZeroChecks));
        }

        let threshold = self.total - 1;
        if self.completed >= threshold && self.success >= threshold {
            Ok(())
        } else {
            Err(Rejection::with_detail(
                RejectionReason::ChecksIncomplete,
                format!(
                    "{}/{} completed, {}/{} successful",
                    self.completed, self.total, self.success, self.total
                ),
            ))
        }
    }
}
