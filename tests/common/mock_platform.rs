//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use automerge_bot::error::{Error, Result};
use automerge_bot::platform::PlatformService;
use automerge_bot::types::{CheckRun, MergeMethod, MergeResult, PlatformConfig, Review};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub head_sha: String,
    pub method: MergeMethod,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable reviews per PR and check runs per ref
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    reviews: Mutex<HashMap<u64, Vec<Review>>>,
    check_runs: Mutex<HashMap<String, Vec<CheckRun>>>,
    merge_responses: Mutex<HashMap<u64, MergeResult>>,
    // Call tracking
    list_reviews_calls: Mutex<Vec<u64>>,
    list_check_runs_calls: Mutex<Vec<String>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_list_reviews: Mutex<Option<String>>,
    error_on_list_check_runs: Mutex<Option<String>>,
    error_on_merge_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            reviews: Mutex::new(HashMap::new()),
            check_runs: Mutex::new(HashMap::new()),
            merge_responses: Mutex::new(HashMap::new()),
            list_reviews_calls: Mutex::new(Vec::new()),
            list_check_runs_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            error_on_list_reviews: Mutex::new(None),
            error_on_list_check_runs: Mutex::new(None),
            error_on_merge_pr: Mutex::new(None),
        }
    }

    // === Response setup ===

    pub fn set_reviews(&self, pr_number: u64, reviews: Vec<Review>) {
        self.reviews.lock().unwrap().insert(pr_number, reviews);
    }

    pub fn set_check_runs(&self, git_ref: &str, runs: Vec<CheckRun>) {
        self.check_runs
            .lock()
            .unwrap()
            .insert(git_ref.to_string(), runs);
    }

    pub fn set_merge_response(&self, pr_number: u64, result: MergeResult) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert(pr_number, result);
    }

    // === Error injection methods ===

    pub fn fail_list_reviews(&self, msg: &str) {
        *self.error_on_list_reviews.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_list_check_runs(&self, msg: &str) {
        *self.error_on_list_check_runs.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_merge_pr(&self, msg: &str) {
        *self.error_on_merge_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Call inspection ===

    pub fn get_list_reviews_calls(&self) -> Vec<u64> {
        self.list_reviews_calls.lock().unwrap().clone()
    }

    pub fn get_list_check_runs_calls(&self) -> Vec<String> {
        self.list_check_runs_calls.lock().unwrap().clone()
    }

    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    pub fn merge_call_count(&self) -> usize {
        self.merge_pr_calls.lock().unwrap().len()
    }

    pub fn assert_merge_called_with(&self, pr_number: u64, head_sha: &str, method: MergeMethod) {
        let calls = self.get_merge_pr_calls();
        assert!(
            calls.iter().any(|c| c.pr_number == pr_number
                && c.head_sha == head_sha
                && c.method == method),
            "expected merge_pr({pr_number}, {head_sha}, {method}), got {calls:?}"
        );
    }

    pub fn assert_merge_not_called(&self) {
        let calls = self.get_merge_pr_calls();
        assert!(calls.is_empty(), "expected no merge calls, got {calls:?}");
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        self.list_reviews_calls.lock().unwrap().push(pr_number);
        if let Some(msg) = self.error_on_list_reviews.lock().unwrap().clone() {
            return Err(Error::GitHubApi(msg));
        }
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_check_runs(&self, git_ref: &str) -> Result<Vec<CheckRun>> {
        self.list_check_runs_calls
            .lock()
            .unwrap()
            .push(git_ref.to_string());
        if let Some(msg) = self.error_on_list_check_runs.lock().unwrap().clone() {
            return Err(Error::GitHubApi(msg));
        }
        Ok(self
            .check_runs
            .lock()
            .unwrap()
            .get(git_ref)
            .cloned()
            .unwrap_or_default())
    }

    async fn merge_pr(
        &self,
        pr_number: u64,
        head_sha: &str,
        method: MergeMethod,
    ) -> Result<MergeResult> {
        self.merge_pr_calls.lock().unwrap().push(MergePrCall {
            pr_number,
            head_sha: head_sha.to_string(),
            method,
        });
        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().clone() {
            return Err(Error::GitHubApi(msg));
        }
        Ok(self
            .merge_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_else(|| MergeResult {
                merged: true,
                sha: Some(format!("merge-{pr_number}")),
                message: None,
            }))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
