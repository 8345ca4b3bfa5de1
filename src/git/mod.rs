//! Version-control queries
//!
//! [`GitQuery`] is the interface the stack detector and submission engine
//! consume; [`CliGit`] implements it by shelling out to git.

mod cli;

pub use cli::CliGit;

use crate::error::Result;
use crate::types::{GitRemote, PushStrategy};
use async_trait::async_trait;

/// Version-control query interface
///
/// Everything the submission pipeline needs to know about (or do to) the
/// repository, so the core logic can be exercised against a mock.
#[async_trait]
pub trait GitQuery: Send + Sync {
    /// Name of the currently checked-out branch
    async fn current_branch(&self) -> Result<String>;

    /// Names of all local branches
    async fn local_branches(&self) -> Result<Vec<String>>;

    /// Whether a branch exists in the local branch set
    async fn branch_exists_locally(&self, name: &str) -> bool;

    /// Whether a branch exists on the remote
    ///
    /// `Ok(false)` means the remote answered and the branch is absent;
    /// `Err` means the remote could not be consulted.
    async fn branch_exists_remotely(&self, name: &str) -> Result<bool>;

    /// Whether `ancestor` is an ancestor of `descendant` (merge-base test)
    async fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool>;

    /// Number of commits reachable from `branch` but not from `base`
    async fn commit_count(&self, base: &str, branch: &str) -> Result<u32>;

    /// Subjects of commits unique to `branch` versus `base`, oldest first
    async fn commit_messages(&self, base: &str, branch: &str) -> Result<Vec<String>>;

    /// Push `branch` to the remote using the given strategy
    ///
    /// `Err` carries git's failure output; the push orchestrator treats it
    /// as a normal state-machine transition, not a fatal error.
    async fn push(&self, branch: &str, strategy: PushStrategy) -> Result<()>;

    /// Configured remotes with their URLs
    async fn remotes(&self) -> Result<Vec<GitRemote>>;

    /// The trunk branch the remote considers its default
    async fn default_branch(&self) -> Result<String>;
}
