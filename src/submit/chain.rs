//! PR chain builder
//!
//! Walks the detected stack in order and opens one pull request per
//! branch, each targeting the previous branch in the chain (the first
//! targets trunk). The fold state is a single `previous_branch`
//! accumulator.
//!
//! The two skip outcomes differ in one crucial way: a branch that is not
//! on the remote is not part of the chain at all, so the next branch
//! still targets whatever this one would have targeted. A branch with no
//! unique commits IS part of the chain (there is just nothing to review),
//! so it becomes the base for the branch after it.

use crate::git::GitQuery;
use crate::platform::PlatformService;
use crate::submit::ProgressCallback;
use crate::types::{Branch, PullRequest};
use std::fmt;
use tracing::debug;

/// Outcome of resolving one branch's pull request
#[derive(Debug, Clone)]
pub enum PrOutcome {
    /// A new PR was created
    Created(PullRequest),
    /// An open PR with this head branch already exists
    AlreadyExists(PullRequest),
    /// Branch is not on the remote (or equals its base); the chain does
    /// not advance past it
    SkippedNotPushed,
    /// Branch has no commits unique to its base; no PR, but the chain
    /// advances so later branches target it
    SkippedNoCommits,
    /// Remote check, commit lookup, or PR creation failed
    Failed(String),
}

impl PrOutcome {
    /// Whether this branch becomes the base for the next branch
    pub const fn advances_chain(&self) -> bool {
        !matches!(self, Self::SkippedNotPushed)
    }

    /// Whether this outcome counts against the aggregate result
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for PrOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(pr) => write!(f, "created #{}", pr.number),
            Self::AlreadyExists(pr) => write!(f, "already exists (#{})", pr.number),
            Self::SkippedNotPushed => f.write_str("skipped (not on remote)"),
            Self::SkippedNoCommits => f.write_str("skipped (no commits against base)"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Per-branch PR result
#[derive(Debug, Clone)]
pub struct BranchPr {
    /// Head branch
    pub branch: String,
    /// Base the PR targeted (or would have targeted)
    pub pr_base: String,
    /// What happened
    pub outcome: PrOutcome,
}

/// Aggregate result of the PR phase
#[derive(Debug, Clone)]
pub struct PrReport {
    /// True when no branch ended in [`PrOutcome::Failed`]
    pub all_succeeded: bool,
    /// Per-branch outcomes, in stack order
    pub results: Vec<BranchPr>,
}

/// Create or verify a chained pull request for every branch in the stack
pub async fn create_all_prs(
    git: &dyn GitQuery,
    platform: &dyn PlatformService,
    base_branch: &str,
    branches: &[Branch],
    progress: &dyn ProgressCallback,
) -> PrReport {
    let mut previous_branch: Option<String> = None;
    let mut results = Vec::with_capacity(branches.len());

    for branch in branches {
        let pr_base = previous_branch
            .clone()
            .unwrap_or_else(|| base_branch.to_string());

        let outcome = create_pr_for_branch(git, platform, &branch.name, &pr_base).await;

        if let PrOutcome::Created(pr) = &outcome {
            progress.on_pr_created(&branch.name, pr).await;
        } else {
            progress.on_pr_outcome(&branch.name, &outcome).await;
        }

        if outcome.advances_chain() {
            previous_branch = Some(branch.name.clone());
        }

        results.push(BranchPr {
            branch: branch.name.clone(),
            pr_base,
            outcome,
        });
    }

    PrReport {
        all_succeeded: results.iter().all(|r| !r.outcome.is_failure()),
        results,
    }
}

/// Resolve one branch against its chain base
async fn create_pr_for_branch(
    git: &dyn GitQuery,
    platform: &dyn PlatformService,
    head: &str,
    pr_base: &str,
) -> PrOutcome {
    if head == pr_base {
        debug!("skipping {head}: head equals base");
        return PrOutcome::SkippedNotPushed;
    }

    match git.branch_exists_remotely(head).await {
        Ok(true) => {}
        Ok(false) => {
            debug!("skipping {head}: not pushed to remote");
            return PrOutcome::SkippedNotPushed;
        }
        Err(e) => return PrOutcome::Failed(format!("remote existence check failed: {e}")),
    }

    match git.commit_count(pr_base, head).await {
        Ok(0) => {
            debug!("skipping {head}: no commits unique to {pr_base}");
            return PrOutcome::SkippedNoCommits;
        }
        Ok(_) => {}
        Err(e) => return PrOutcome::Failed(format!("commit count failed: {e}")),
    }

    match platform.find_pr_by_head(head).await {
        Ok(Some(pr)) => return PrOutcome::AlreadyExists(pr),
        Ok(None) => {}
        Err(e) => return PrOutcome::Failed(format!("PR lookup failed: {e}")),
    }

    let messages = match git.commit_messages(pr_base, head).await {
        Ok(messages) => messages,
        Err(e) => return PrOutcome::Failed(format!("commit messages lookup failed: {e}")),
    };

    let title = pr_title(&messages, head);
    let body = pr_body(&messages);

    match platform.create_pr(head, pr_base, &title, &body).await {
        Ok(pr) => PrOutcome::Created(pr),
        Err(e) => PrOutcome::Failed(e.to_string()),
    }
}

/// PR title: the first (oldest) unique commit subject, falling back to
/// the branch name
fn pr_title(messages: &[String], head: &str) -> String {
    messages
        .first()
        .cloned()
        .unwrap_or_else(|| head.to_string())
}

/// PR body: a `## Commits` heading over one bullet per unique commit,
/// empty when there are none
fn pr_body(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let mut lines = vec!["## Commits".to_string()];
    lines.extend(messages.iter().map(|m| format!("- {m}")));
    lines.join("\n")
}
