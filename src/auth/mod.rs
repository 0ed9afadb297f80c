//! Authentication for GitHub
//!
//! Supports an explicit token, environment variables, and the `gh` CLI.

use crate::error::{Error, Result};
use tokio::process::Command;
use tracing::debug;

/// Environment variables consulted for a token, in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed on the command line
    Explicit,
    /// Token from environment variable
    EnvVar,
    /// Token from the `gh` CLI
    Cli,
}

/// A resolved GitHub token
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// The token itself
    pub token: String,
    /// Where it came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Pick the first usable token from an explicit value or the environment
///
/// `lookup` resolves an environment variable; blank values are skipped.
pub fn token_from_sources(
    explicit: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<GitHubAuthConfig> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Some(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Explicit,
        });
    }

    TOKEN_ENV_VARS.iter().find_map(|var| {
        lookup(var)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|token| {
                debug!(var, "using token from environment");
                GitHubAuthConfig {
                    token,
                    source: AuthSource::EnvVar,
                }
            })
    })
}

/// Resolve a GitHub token
///
/// Order: `explicit`, `GITHUB_TOKEN`, `GH_TOKEN`, then `gh auth token`.
pub async fn get_github_auth(explicit: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(auth) = token_from_sources(explicit, |var| std::env::var(var).ok()) {
        return Ok(auth);
    }

    debug!("no token in environment, asking gh CLI");
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .map_err(|e| Error::Auth(format!("no token set and failed to run gh: {e}")))?;

    if !output.status.success() {
        return Err(Error::Auth(
            "no token set and `gh auth token` failed; set GITHUB_TOKEN".to_string(),
        ));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(Error::Auth("gh returned an empty token".to_string()));
    }

    Ok(GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
    })
}
