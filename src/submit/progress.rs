//! Progress callback trait for interface-agnostic updates
//!
//! Lets different frontends (CLI, tests) observe the submission as it
//! runs without the engine knowing how output is rendered.

use crate::error::Error;
use crate::submit::PrOutcome;
use crate::types::PullRequest;
use async_trait::async_trait;
use std::fmt;

/// Submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Detecting the branch stack
    Detecting,
    /// Pushing branches to the remote
    Pushing,
    /// Creating chained pull requests
    CreatingPrs,
    /// Submission complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Detecting => "Detecting stack",
            Self::Pushing => "Pushing branches",
            Self::CreatingPrs => "Creating pull requests",
            Self::Complete => "Done",
        };
        f.write_str(name)
    }
}

/// Push operation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushStatus {
    /// Push started
    Started,
    /// Push succeeded
    Success,
    /// Branch missing locally, nothing pushed
    Skipped,
    /// Every applicable strategy failed
    Failed(String),
}

impl fmt::Display for PushStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => f.write_str("started"),
            Self::Success => f.write_str("pushed"),
            Self::Skipped => f.write_str("skipped (not found locally)"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Progress callback trait
///
/// Implement this to receive progress updates during submission. The CLI
/// prints styled lines; tests usually use [`NoopProgress`].
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called as a branch moves through the push state machine
    async fn on_branch_push(&self, branch: &str, status: PushStatus);

    /// Called when a PR is created
    async fn on_pr_created(&self, branch: &str, pr: &PullRequest);

    /// Called when a branch resolved to an existing or skipped PR
    async fn on_pr_outcome(&self, branch: &str, outcome: &PrOutcome);

    /// Called when a recoverable error occurs
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_branch_push(&self, _branch: &str, _status: PushStatus) {}
    async fn on_pr_created(&self, _branch: &str, _pr: &PullRequest) {}
    async fn on_pr_outcome(&self, _branch: &str, _outcome: &PrOutcome) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
