//! Merge pipeline for one pull request event
//!
//! Three-phase pattern:
//! 1. Gather - fetch reviews and check runs, reduce onto the snapshot (effectful)
//! 2. Evaluate - `eligibility::evaluate` (pure, testable)
//! 3. Execute - merge when the verdict allows it (effectful)

mod execute;
mod gather;

pub use execute::{MergeOutcome, execute_merge};
pub use gather::gather_snapshot;
