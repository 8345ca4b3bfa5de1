//! Platform detection from remote URLs

use crate::error::{Error, Result};
use crate::types::{Platform, PlatformConfig};
use regex::Regex;
use std::env;

/// Decide whether a remote URL points at GitHub or GitLab
///
/// Self-hosted instances are recognized through `GH_HOST` and
/// `GITLAB_HOST`.
pub fn detect_platform(url: &str) -> Option<Platform> {
    let hostname = extract_hostname(url)?;

    if hostname == "github.com"
        || hostname.ends_with(".github.com")
        || env::var("GH_HOST").is_ok_and(|h| hostname == h)
    {
        return Some(Platform::GitHub);
    }

    if hostname == "gitlab.com"
        || hostname.ends_with(".gitlab.com")
        || env::var("GITLAB_HOST").is_ok_and(|h| hostname == h)
    {
        return Some(Platform::GitLab);
    }

    None
}

/// Parse owner/repo/host out of a remote URL
///
/// Handles SSH (`git@host:owner/repo.git`) and HTTPS forms; GitLab
/// nested groups end up in `owner`.
pub fn parse_repo_info(url: &str) -> Result<PlatformConfig> {
    let platform = detect_platform(url).ok_or(Error::NoSupportedRemotes)?;
    let hostname = extract_hostname(url);

    let re_ssh = Regex::new(r"git@[^:]+:(.+?)(?:\.git)?$").expect("valid regex");
    let re_https = Regex::new(r"https?://[^/]+/(.+?)(?:\.git)?$").expect("valid regex");

    let path = re_ssh
        .captures(url)
        .or_else(|| re_https.captures(url))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::Parse(format!("cannot parse remote URL: {url}")))?;

    let parts: Vec<&str> = path.split('/').collect();
    let (&repo, owner_parts) = parts
        .split_last()
        .filter(|(_, owner)| !owner.is_empty())
        .ok_or_else(|| Error::Parse(format!("invalid repo path: {path}")))?;

    let default_host = match platform {
        Platform::GitHub => "github.com",
        Platform::GitLab => "gitlab.com",
    };
    let host = hostname.filter(|h| h != default_host);

    Ok(PlatformConfig {
        platform,
        owner: owner_parts.join("/"),
        repo: repo.to_string(),
        host,
    })
}

fn extract_hostname(url: &str) -> Option<String> {
    if let Some(rest) = url.strip_prefix("git@") {
        return rest.split(':').next().map(ToString::to_string);
    }

    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
}
