//! Core types for stackup

use serde::{Deserialize, Serialize};

/// A local branch that is part of a stack
///
/// Branches are ephemeral query results recomputed on every invocation,
/// never stored state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    /// Branch name (unique within the repository's local branch set)
    pub name: String,
    /// Number of commits reachable from the branch but not from the base
    /// branch, i.e. its distance ahead of trunk
    pub commit_count: u32,
}

/// Snapshot of a detected stack, ordered from trunk outward
///
/// `branches` is sorted ascending by [`Branch::commit_count`]; that
/// ordering encodes "earliest in stack first". Computed once per run and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackInfo {
    /// Trunk branch the stack is based on
    pub base_branch: String,
    /// Branch the detection started from
    pub current_branch: String,
    /// Stack members, ascending by commit count
    pub branches: Vec<Branch>,
}

/// A pull request / merge request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR/MR number
    pub number: u64,
    /// Web URL for the PR/MR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR/MR title
    pub title: String,
}

/// A git remote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Remote URL
    pub url: String,
}

/// Detected platform type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// GitHub or GitHub Enterprise
    GitHub,
    /// GitLab or self-hosted GitLab
    GitLab,
}

/// Platform configuration
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Platform type
    pub platform: Platform,
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com/gitlab.com)
    pub host: Option<String>,
}

/// How a branch is pushed to the remote
///
/// The push orchestrator walks these in a strict fallback order; the
/// ordering here mirrors that escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushStrategy {
    /// Plain `git push`
    Regular,
    /// `git push --set-upstream`, for branches without a remote counterpart
    SetUpstream,
    /// `git push --force-with-lease`
    ForceWithLease,
    /// `git push --force`, only when explicitly enabled
    Force,
}

impl PushStrategy {
    /// The git flag for this strategy, if any
    pub const fn flag(self) -> Option<&'static str> {
        match self {
            Self::Regular => None,
            Self::SetUpstream => Some("--set-upstream"),
            Self::ForceWithLease => Some("--force-with-lease"),
            Self::Force => Some("--force"),
        }
    }
}

impl std::fmt::Display for PushStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Regular => "regular",
            Self::SetUpstream => "set-upstream",
            Self::ForceWithLease => "force-with-lease",
            Self::Force => "force",
        };
        f.write_str(name)
    }
}
