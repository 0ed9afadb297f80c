//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::event::{CheckRunsPayload, ReviewPayload, UserPayload};
use crate::platform::PlatformService;
use crate::types::{CheckRun, MergeMethod, MergeResult, PlatformConfig, Review};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Public GitHub REST API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Check runs requested per page (the API maximum)
const CHECK_RUNS_PER_PAGE: usize = 100;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (check runs)
    token: String,
    /// HTTP client for raw requests (check runs)
    http_client: Client,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_base` overrides the REST endpoint, e.g. `https://ghe.example.com/api/v3`
    /// (GitHub Actions exposes it as `GITHUB_API_URL`).
    pub fn new(token: &str, owner: String, repo: String, api_base: Option<&str>) -> Result<Self> {
        let api_base = api_base.unwrap_or(DEFAULT_API_BASE);
        let parsed = Url::parse(api_base)
            .map_err(|e| Error::GitHubApi(format!("invalid API URL {api_base}: {e}")))?;
        let api_base = parsed.as_str().trim_end_matches('/').to_string();

        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if api_base != DEFAULT_API_BASE {
            builder = builder
                .base_uri(api_base.as_str())
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("automerge-bot")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                owner,
                repo,
                api_base,
            },
            token: token.to_string(),
            http_client,
        })
    }

    /// Fetch one page of check runs
    async fn fetch_check_runs_page(&self, git_ref: &str, page: usize) -> Result<CheckRunsPayload> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}/check-runs?per_page={CHECK_RUNS_PER_PAGE}&page={page}",
            self.config.api_base, self.config.owner, self.config.repo, git_ref
        );

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch check runs: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Check runs request returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse check runs: {e}")))
    }
}

/// Helper to convert an octocrab review to our `Review` type
///
/// The state is taken in its wire form (`CHANGES_REQUESTED`, ...) and run
/// through [`ReviewPayload::into_review`], the same conversion raw review
/// listings get. Pending reviews have no `submitted_at` and are dropped, as
/// are reviews whose author account no longer exists.
fn review_from_octocrab(review: &octocrab::models::pulls::Review) -> Option<Review> {
    let state = review
        .state
        .as_ref()
        .and_then(|state| serde_json::to_value(state).ok())
        .and_then(|value| value.as_str().map(str::to_string));

    ReviewPayload {
        user: review.user.as_ref().map(|user| UserPayload {
            login: user.login.clone(),
        }),
        submitted_at: review.submitted_at,
        state,
    }
    .into_review()
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        debug!(pr_number, "listing reviews");
        let first_page = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list_reviews(pr_number)
            .send()
            .await?;

        let all = self.client.all_pages(first_page).await?;
        let reviews: Vec<Review> = all.iter().filter_map(review_from_octocrab).collect();
        debug!(
            pr_number,
            listed = all.len(),
            submitted = reviews.len(),
            "listed reviews"
        );
        Ok(reviews)
    }

    async fn list_check_runs(&self, git_ref: &str) -> Result<Vec<CheckRun>> {
        debug!(git_ref, "listing check runs");
        let mut runs = Vec::new();
        let mut page = 1;

        loop {
            let payload = self.fetch_check_runs_page(git_ref, page).await?;
            let fetched = payload.check_runs.len();
            runs.extend(payload.check_runs);

            if fetched == 0 || runs.len() >= payload.total_count {
                break;
            }
            page += 1;
        }

        debug!(git_ref, count = runs.len(), "listed check runs");
        Ok(runs)
    }

    async fn merge_pr(
        &self,
        pr_number: u64,
        head_sha: &str,
        method: MergeMethod,
    ) -> Result<MergeResult> {
        debug!(pr_number, head_sha, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .merge(pr_number)
            .method(octocrab_method)
            .sha(head_sha)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReviewVerdict;
    use mockito::Matcher;
    use serde_json::json;

    const SUBMITTED: Option<&str> = Some("2024-05-01T12:00:00Z");

    fn run(name: &str) -> serde_json::Value {
        json!({ "name": name, "status": "completed", "conclusion": "success" })
    }

    #[test]
    fn test_rejects_invalid_api_url() {
        let result = GitHubService::new("t", "o".into(), "r".into(), Some("not a url"));
        assert!(matches!(result, Err(Error::GitHubApi(_))));
    }

    #[tokio::test]
    async fn test_api_base_trailing_slash_trimmed() {
        let service = GitHubService::new(
            "t",
            "o".into(),
            "r".into(),
            Some("https://ghe.example.com/api/v3/"),
        )
        .unwrap();
        assert_eq!(service.config().api_base, "https://ghe.example.com/api/v3");
    }

    #[tokio::test]
    async fn test_list_check_runs_follows_pages() {
        let mut server = mockito::Server::new_async().await;
        let path = "/repos/octo/widgets/commits/abc123/check-runs";

        let first: Vec<_> = (0..100).map(|i| run(&format!("job-{i}"))).collect();
        let page_one = server
            .mock("GET", path)
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .match_header("authorization", "Bearer secret")
            .with_header("content-type", "application/json")
            .with_body(json!({ "total_count": 101, "check_runs": first }).to_string())
            .create_async()
            .await;
        let page_two = server
            .mock("GET", path)
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_header("content-type", "application/json")
            .with_body(json!({ "total_count": 101, "check_runs": [run("last")] }).to_string())
            .create_async()
            .await;

        let url = server.url();
        let service =
            GitHubService::new("secret", "octo".into(), "widgets".into(), Some(&url)).unwrap();
        let runs = service.list_check_runs("abc123").await.unwrap();

        page_one.assert_async().await;
        page_two.assert_async().await;
        assert_eq!(runs.len(), 101);
        assert_eq!(runs[100].name, "last");
    }

    #[tokio::test]
    async fn test_list_check_runs_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/widgets/commits/abc123/check-runs")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let url = server.url();
        let service =
            GitHubService::new("secret", "octo".into(), "widgets".into(), Some(&url)).unwrap();
        let result = service.list_check_runs("abc123").await;

        match result {
            Err(Error::GitHubApi(msg)) => assert!(msg.contains("404")),
            other => panic!("Expected GitHubApi error, got: {other:?}"),
        }
    }

    fn author(login: &str) -> serde_json::Value {
        let api = format!("https://api.github.com/users/{login}");
        json!({
            "login": login,
            "id": 1,
            "node_id": "MDQ6VXNlcjE=",
            "avatar_url": "https://avatars.githubusercontent.com/u/1",
            "gravatar_id": "",
            "url": api,
            "html_url": format!("https://github.com/{login}"),
            "followers_url": format!("{api}/followers"),
            "following_url": format!("{api}/following"),
            "gists_url": format!("{api}/gists"),
            "starred_url": format!("{api}/starred"),
            "subscriptions_url": format!("{api}/subscriptions"),
            "organizations_url": format!("{api}/orgs"),
            "repos_url": format!("{api}/repos"),
            "events_url": format!("{api}/events"),
            "received_events_url": format!("{api}/received_events"),
            "type": "User",
            "site_admin": false
        })
    }

    fn review_json(
        id: u64,
        user: Option<&str>,
        state: &str,
        submitted_at: Option<&str>,
    ) -> serde_json::Value {
        json!({
            "id": id,
            "node_id": format!("PRR_{id}"),
            "user": user.map(author),
            "body": "",
            "state": state,
            "html_url": format!("https://github.com/octo/widgets/pull/42#pullrequestreview-{id}"),
            "pull_request_url": "https://api.github.com/repos/octo/widgets/pulls/42",
            "author_association": "MEMBER",
            "submitted_at": submitted_at,
            "commit_id": "abc123"
        })
    }

    fn verdict_of(review: serde_json::Value) -> Option<ReviewVerdict> {
        let review: octocrab::models::pulls::Review = serde_json::from_value(review).unwrap();
        review_from_octocrab(&review).map(|r| r.verdict)
    }

    #[test]
    fn test_review_states_keep_wire_names() {
        assert_eq!(
            verdict_of(review_json(1, Some("a"), "APPROVED", SUBMITTED)),
            Some(ReviewVerdict::Approved)
        );
        assert_eq!(
            verdict_of(review_json(2, Some("b"), "COMMENTED", SUBMITTED)),
            Some(ReviewVerdict::Commented)
        );
        assert_eq!(
            verdict_of(review_json(3, Some("c"), "CHANGES_REQUESTED", SUBMITTED)),
            Some(ReviewVerdict::Other("CHANGES_REQUESTED".to_string()))
        );
        assert_eq!(
            verdict_of(review_json(4, Some("d"), "DISMISSED", SUBMITTED)),
            Some(ReviewVerdict::Other("DISMISSED".to_string()))
        );
    }

    #[test]
    fn test_unsubmitted_and_orphaned_reviews_dropped() {
        assert_eq!(verdict_of(review_json(1, Some("bob"), "PENDING", None)), None);
        assert_eq!(verdict_of(review_json(2, None, "APPROVED", SUBMITTED)), None);
    }

    #[tokio::test]
    async fn test_list_reviews_follows_pages() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let next = format!("<{url}/repositories/7/pulls/42/reviews?page=2>; rel=\"next\"");

        let page_one = server
            .mock("GET", "/repos/octo/widgets/pulls/42/reviews")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer secret")
            .with_header("content-type", "application/json")
            .with_header("link", &next)
            .with_body(
                json!([
                    review_json(1, Some("alice"), "APPROVED", SUBMITTED),
                    review_json(2, Some("bob"), "PENDING", None),
                    review_json(3, None, "APPROVED", SUBMITTED),
                ])
                .to_string(),
            )
            .create_async()
            .await;
        let page_two = server
            .mock("GET", "/repositories/7/pulls/42/reviews")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    review_json(4, Some("carol"), "CHANGES_REQUESTED", SUBMITTED),
                    review_json(5, Some("dave"), "DISMISSED", SUBMITTED),
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let service =
            GitHubService::new("secret", "octo".into(), "widgets".into(), Some(&url)).unwrap();
        let reviews = service.list_reviews(42).await.unwrap();

        page_one.assert_async().await;
        page_two.assert_async().await;
        let summary: Vec<_> = reviews
            .iter()
            .map(|r| (r.reviewer.as_str(), r.verdict.to_string()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("alice", "APPROVED".to_string()),
                ("carol", "CHANGES_REQUESTED".to_string()),
                ("dave", "DISMISSED".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_merge_pr_pins_head_sha() {
        let mut server = mockito::Server::new_async().await;
        let merge = server
            .mock("PUT", "/repos/octo/widgets/pulls/42/merge")
            .match_body(Matcher::PartialJson(json!({ "sha": "abc123", "merge_method": "rebase" })))
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "sha": "def456",
                    "merged": true,
                    "message": "Pull Request successfully merged"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let url = server.url();
        let service =
            GitHubService::new("secret", "octo".into(), "widgets".into(), Some(&url)).unwrap();
        let result = service
            .merge_pr(42, "abc123", MergeMethod::Rebase)
            .await
            .unwrap();

        merge.assert_async().await;
        assert!(result.merged);
        assert_eq!(result.sha.as_deref(), Some("def456"));
    }

    #[tokio::test]
    async fn test_merge_pr_head_moved() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("PUT", "/repos/octo/widgets/pulls/42/merge")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "message": "Head branch was modified. Review and try the merge again.",
                    "documentation_url": "https://docs.github.com/rest"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let url = server.url();
        let service =
            GitHubService::new("secret", "octo".into(), "widgets".into(), Some(&url)).unwrap();
        let result = service.merge_pr(42, "stale", MergeMethod::Squash).await;

        match result {
            Err(Error::GitHubApi(msg)) => assert!(msg.contains("Merge failed")),
            other => panic!("Expected GitHubApi error, got: {other:?}"),
        }
    }
}
