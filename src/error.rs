//! Error types for automerge-bot

use thiserror::Error;

/// Errors raised by the I/O layer around the eligibility engine.
///
/// The decision logic itself never fails; a rejected pull request is a
/// [`Verdict`](crate::eligibility::Verdict), not an error.
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API call failed or returned something unusable
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Error surfaced by the octocrab client
    #[error("GitHub client error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// Event payload missing, unreadable, or malformed
    #[error("event payload error: {0}")]
    Event(String),

    /// Configuration file unreadable or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// No usable GitHub token
    #[error("authentication error: {0}")]
    Auth(String),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
