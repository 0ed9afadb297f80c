//! Eligibility engine for automatic merging
//!
//! Pure, testable core of the bot. No I/O happens here - reviews and check
//! runs are fetched beforehand and handed in as plain data:
//! 1. Reduce - collapse review events and check runs (`reviews`, `checks`)
//! 2. Evaluate - combine labels, reviews and checks into a `Verdict`

mod checks;
mod evaluate;
mod reviews;
mod verdict;

pub use checks::CheckTotals;
pub use evaluate::{can_merge, evaluate};
pub use reviews::{ReviewEntry, ReviewState};
pub use verdict::{Rejection, RejectionReason, Verdict};
