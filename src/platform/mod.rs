//! Review-service integrations for GitHub and GitLab
//!
//! Provides a unified interface for the PR operations the submission
//! engine needs, plus detection of which platform a remote points at.

mod detection;
mod factory;
mod github;
mod gitlab;

pub use detection::{detect_platform, parse_repo_info};
pub use factory::create_platform_service;
pub use github::GitHubService;
pub use gitlab::GitLabService;

use crate::error::Result;
use crate::types::{PlatformConfig, PullRequest};
use async_trait::async_trait;

/// Review-service interface
///
/// Abstracts GitHub and GitLab so the chain builder works with either.
/// Only the three operations the submission pipeline consumes.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Whether the configured credentials are accepted by the service
    async fn is_authenticated(&self) -> bool;

    /// Find an existing open PR by its head branch name
    async fn find_pr_by_head(&self, head_branch: &str) -> Result<Option<PullRequest>>;

    /// Create a new PR
    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest>;

    /// The platform configuration
    fn config(&self) -> &PlatformConfig;
}
