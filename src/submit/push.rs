//! Push orchestrator
//!
//! Pushes every stack branch with a strict fallback ladder: regular push,
//! then set-upstream for branches the remote has never seen, then
//! force-with-lease, then (only when enabled) plain force. First success
//! wins; one branch failing never stops the rest.

use crate::git::GitQuery;
use crate::submit::{ProgressCallback, PushStatus};
use crate::types::{Branch, PushStrategy};
use tracing::debug;

/// Terminal state of one branch's trip through the push state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Pushed, recording the strategy that finally succeeded
    Pushed(PushStrategy),
    /// Branch missing locally, nothing attempted
    Skipped,
    /// Every applicable strategy failed
    Failed(String),
}

/// Per-branch push result
#[derive(Debug, Clone)]
pub struct BranchPush {
    /// Branch name
    pub branch: String,
    /// How the state machine ended for this branch
    pub outcome: PushOutcome,
}

/// Aggregate result of the push phase
#[derive(Debug, Clone)]
pub struct PushReport {
    /// True when no branch ended in [`PushOutcome::Failed`]
    pub all_succeeded: bool,
    /// Per-branch outcomes, in stack order
    pub results: Vec<BranchPush>,
}

/// Push every branch in stack order
///
/// Each attempt is a real mutating push with no rollback; failures are
/// recorded and processing continues to completion.
pub async fn push_all_branches(
    git: &dyn GitQuery,
    branches: &[Branch],
    allow_force_push: bool,
    progress: &dyn ProgressCallback,
) -> PushReport {
    let mut results = Vec::with_capacity(branches.len());

    for branch in branches {
        let outcome = push_one(git, &branch.name, allow_force_push, progress).await;

        let status = match &outcome {
            PushOutcome::Pushed(_) => PushStatus::Success,
            PushOutcome::Skipped => PushStatus::Skipped,
            PushOutcome::Failed(msg) => PushStatus::Failed(msg.clone()),
        };
        progress.on_branch_push(&branch.name, status).await;

        results.push(BranchPush {
            branch: branch.name.clone(),
            outcome,
        });
    }

    PushReport {
        all_succeeded: results
            .iter()
            .all(|r| !matches!(r.outcome, PushOutcome::Failed(_))),
        results,
    }
}

/// Run the fallback ladder for a single branch
async fn push_one(
    git: &dyn GitQuery,
    branch: &str,
    allow_force_push: bool,
    progress: &dyn ProgressCallback,
) -> PushOutcome {
    if !git.branch_exists_locally(branch).await {
        debug!("skipping push of {branch}: not found locally");
        return PushOutcome::Skipped;
    }

    progress.on_branch_push(branch, PushStatus::Started).await;

    let regular_err = match git.push(branch, PushStrategy::Regular).await {
        Ok(()) => return PushOutcome::Pushed(PushStrategy::Regular),
        Err(e) => e,
    };
    debug!("regular push of {branch} failed: {regular_err}");

    let on_remote = match git.branch_exists_remotely(branch).await {
        Ok(exists) => exists,
        Err(e) => {
            return PushOutcome::Failed(format!("remote existence check failed: {e}"));
        }
    };

    if !on_remote {
        return match git.push(branch, PushStrategy::SetUpstream).await {
            Ok(()) => PushOutcome::Pushed(PushStrategy::SetUpstream),
            Err(e) => PushOutcome::Failed(e.to_string()),
        };
    }

    let lease_err = match git.push(branch, PushStrategy::ForceWithLease).await {
        Ok(()) => return PushOutcome::Pushed(PushStrategy::ForceWithLease),
        Err(e) => e,
    };

    if !allow_force_push {
        return PushOutcome::Failed(format!(
            "{lease_err}; force push disabled (set STACKUP_FORCE_PUSH=1 to allow)"
        ));
    }

    match git.push(branch, PushStrategy::Force).await {
        Ok(()) => PushOutcome::Pushed(PushStrategy::Force),
        Err(e) => PushOutcome::Failed(e.to_string()),
    }
}
