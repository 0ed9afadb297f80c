//! Shared fixtures for automerge-bot tests

#![allow(dead_code)]

mod mock_platform;

#[allow(unused_imports)]
pub use mock_platform::{MergePrCall, MockPlatformService};

use automerge_bot::config::MergeConfig;
use automerge_bot::types::{CheckRun, PlatformConfig, PullRequestSnapshot, Review};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use std::collections::BTreeSet;

pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "octo".to_string(),
        repo: "widgets".to_string(),
        api_base: "https://api.github.com".to_string(),
    }
}

/// Timestamp `minutes` after a fixed epoch
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
}

pub fn review(reviewer: &str, minutes: i64, state: &str) -> Review {
    Review::new(reviewer, at(minutes), state)
}

pub fn check_run(name: &str, status: &str, conclusion: Option<&str>) -> CheckRun {
    CheckRun {
        name: name.to_string(),
        status: status.to_string(),
        conclusion: conclusion.map(str::to_string),
    }
}

pub fn passing_run(name: &str) -> CheckRun {
    check_run(name, "completed", Some("success"))
}

pub fn labels(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

/// Config with every gate switched off
pub fn open_config() -> MergeConfig {
    MergeConfig {
        review_required: false,
        checks_enabled: false,
        ..MergeConfig::default()
    }
}

pub fn snapshot_with_labels(names: &[&str]) -> PullRequestSnapshot {
    PullRequestSnapshot {
        number: 42,
        labels: labels(names),
        head_sha: "abc123".to_string(),
        branch_name: "feature".to_string(),
        repo_owner: "octo".to_string(),
        repo_name: "widgets".to_string(),
        head_repo_id: Some(7),
        base_repo_id: 7,
        ..PullRequestSnapshot::default()
    }
}

/// A `pull_request` event payload as GitHub delivers it (trimmed)
pub fn pr_event_json(label_names: &[&str], requested_reviewers: &[&str]) -> serde_json::Value {
    json!({
        "action": "labeled",
        "number": 42,
        "pull_request": {
            "number": 42,
            "title": "Add widgets",
            "labels": label_names
                .iter()
                .map(|n| json!({ "id": 1, "name": n, "color": "ededed" }))
                .collect::<Vec<_>>(),
            "requested_reviewers": requested_reviewers
                .iter()
                .map(|l| json!({ "login": l, "id": 2 }))
                .collect::<Vec<_>>(),
            "head": {
                "ref": "feature",
                "sha": "abc123",
                "repo": { "id": 7, "name": "widgets" }
            },
            "base": {
                "ref": "main",
                "sha": "def456",
                "repo": { "id": 7, "name": "widgets" }
            }
        },
        "repository": {
            "id": 7,
            "name": "widgets",
            "owner": { "login": "octo", "id": 3 }
        }
    })
}
