//! Shared command context for CLI commands
//!
//! Extracts the setup the `run` command needs before it can gather state.

use automerge_bot::auth::get_github_auth;
use automerge_bot::config::{MergeConfig, load_config};
use automerge_bot::error::Result;
use automerge_bot::event::PullRequestEvent;
use automerge_bot::platform::{GitHubService, PlatformService};
use std::path::Path;
use tracing::debug;

/// Everything a command needs to evaluate and merge one event
///
/// - The parsed event payload
/// - The merge configuration
/// - An authenticated platform service for the event's repository
pub struct CommandContext {
    /// The triggering event
    pub event: PullRequestEvent,
    /// Merge rules
    pub config: MergeConfig,
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// This performs the common setup:
    /// - Read the event payload
    /// - Load the configuration (defaults if the file is missing)
    /// - Resolve a token
    /// - Create the GitHub service for the event's repository
    pub async fn new(
        event_path: &Path,
        config_path: &Path,
        token: Option<&str>,
        api_url: Option<&str>,
    ) -> Result<Self> {
        let event = PullRequestEvent::from_path(event_path)?;
        let config = load_config(config_path)?;

        let auth = get_github_auth(token).await?;
        debug!(source = ?auth.source, "resolved GitHub token");

        let platform = GitHubService::new(
            &auth.token,
            event.repository.owner.login.clone(),
            event.repository.name.clone(),
            api_url,
        )?;

        Ok(Self {
            event,
            config,
            platform: Box::new(platform),
        })
    }
}
