//! Platform service factory
//!
//! Creates review-service clients based on detected configuration.

use crate::auth::{get_github_auth, get_gitlab_auth};
use crate::error::Result;
use crate::platform::{GitHubService, GitLabService, PlatformService};
use crate::types::{Platform, PlatformConfig};
use tracing::debug;

/// Create a platform service from configuration
///
/// Looks up credentials and constructs the matching client. Errors here
/// mean the review service is unusable for this run; the caller decides
/// whether that is fatal.
pub async fn create_platform_service(
    config: &PlatformConfig,
) -> Result<Box<dyn PlatformService>> {
    match config.platform {
        Platform::GitHub => {
            let auth = get_github_auth().await?;
            debug!("GitHub token obtained from {:?}", auth.source);
            Ok(Box::new(GitHubService::new(
                &auth.token,
                config.owner.clone(),
                config.repo.clone(),
                config.host.clone(),
            )?))
        }
        Platform::GitLab => {
            let auth = get_gitlab_auth(config.host.as_deref()).await?;
            debug!("GitLab token obtained from {:?}", auth.source);
            Ok(Box::new(GitLabService::new(
                auth.token,
                config.owner.clone(),
                config.repo.clone(),
                Some(auth.host),
            )))
        }
    }
}
