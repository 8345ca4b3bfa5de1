//! Error types for stackup

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while detecting, pushing, or submitting a stack
#[derive(Debug, Error)]
pub enum Error {
    /// The working directory is not inside a git repository
    #[error("not a git repository (or any parent directory)")]
    NotARepo,

    /// The `git` executable could not be spawned
    #[error("git is not available: {0}")]
    GitUnavailable(String),

    /// Refusing to submit while the base branch is checked out
    #[error("current branch is the base branch '{0}'; check out a stack branch first")]
    OnBaseBranch(String),

    /// A named branch does not exist locally
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// No remote pointed at a supported platform
    #[error("no supported remotes found (GitHub or GitLab)")]
    NoSupportedRemotes,

    /// The requested remote is not configured
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// A branch could not be pushed after exhausting every strategy
    #[error("failed to push {branch}: {message}")]
    PushFailed {
        /// Branch that failed to push
        branch: String,
        /// Failure detail from the last attempted strategy
        message: String,
    },

    /// A pull request could not be created
    #[error("failed to create pull request for {branch}: {message}")]
    PrCreationFailed {
        /// Head branch of the failed pull request
        branch: String,
        /// Failure detail from the review service
        message: String,
    },

    /// An external command ran but did not succeed
    #[error("command failed: {0}")]
    CommandFailed(String),

    /// Authentication lookup failed
    #[error("authentication error: {0}")]
    Auth(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitLab API error
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// Failed to parse external data (remote URLs, command output)
    #[error("parse error: {0}")]
    Parse(String),

    /// Catch-all for internal invariant violations
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::GitLabApi(err.to_string())
    }
}
