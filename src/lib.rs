//! automerge-bot: merge eligibility for pull requests
//!
//! The heart of the crate is [`eligibility`], a pure engine that reduces
//! review and check-run streams onto a [`types::PullRequestSnapshot`] and
//! decides whether it may be merged. Everything else is plumbing around it:
//! event payload parsing, configuration, GitHub access and the merge call.

pub mod auth;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod event;
pub mod merge;
pub mod platform;
pub mod telemetry;
pub mod types;
