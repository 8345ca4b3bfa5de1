//! Submission engine
//!
//! Sequences the run: detect the stack, push every branch, verify the
//! review service is usable, create chained pull requests, and fold the
//! two phase results into a single qualitative status.

mod chain;
mod progress;
mod push;

pub use chain::{create_all_prs, BranchPr, PrOutcome, PrReport};
pub use progress::{NoopProgress, Phase, ProgressCallback, PushStatus};
pub use push::{push_all_branches, BranchPush, PushOutcome, PushReport};

use crate::error::{Error, Result};
use crate::git::GitQuery;
use crate::platform::PlatformService;
use crate::stack::detect_stack;
use crate::types::StackInfo;
use std::env;

/// Environment variable enabling the last-resort force push
pub const FORCE_PUSH_ENV: &str = "STACKUP_FORCE_PUSH";

/// Read the force-push flag from the environment (default: disabled)
pub fn force_push_from_env() -> bool {
    env::var(FORCE_PUSH_ENV).is_ok_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        )
    })
}

/// Options for a submission run
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    /// Trunk branch override; detected from the remote when absent
    pub base: Option<String>,
    /// Allow `git push --force` as the final fallback
    pub allow_force_push: bool,
    /// Report the detected stack and planned work without touching
    /// the remote
    pub dry_run: bool,
}

/// Qualitative outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// Every push and every pull request succeeded
    Succeeded,
    /// At least one push failed; pull requests were fine
    PushesFailed,
    /// Pushes were fine; at least one pull request failed (or the PR
    /// phase was skipped wholesale)
    PrsFailed,
    /// Both phases had failures
    BothFailed,
}

impl SubmissionStatus {
    /// The terminal summary line for this status
    pub const fn message(self) -> &'static str {
        match self {
            Self::Succeeded => "Branches pushed and pull requests created",
            Self::PushesFailed => "Some pushes failed; pull requests created",
            Self::PrsFailed => "Branches pushed; some pull requests failed",
            Self::BothFailed => "Some pushes and some pull requests failed",
        }
    }

    /// Whether the run completed without per-branch failures
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Everything that happened during one run
#[derive(Debug, Clone)]
pub struct SubmissionReport {
    /// The detected stack
    pub stack: StackInfo,
    /// Push phase results; absent for dry runs
    pub push: Option<PushReport>,
    /// PR phase results; absent for dry runs and when the review
    /// service was unusable
    pub prs: Option<PrReport>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl SubmissionReport {
    /// Fold both phases into the aggregate status
    ///
    /// A skipped PR phase (service unavailable or unauthenticated)
    /// counts as the PR side failing. Dry runs always succeed.
    pub fn status(&self) -> SubmissionStatus {
        if self.dry_run {
            return SubmissionStatus::Succeeded;
        }

        let pushes_ok = self.push.as_ref().is_none_or(|p| p.all_succeeded);
        let prs_ok = self.prs.as_ref().is_some_and(|p| p.all_succeeded);

        match (pushes_ok, prs_ok) {
            (true, true) => SubmissionStatus::Succeeded,
            (false, true) => SubmissionStatus::PushesFailed,
            (true, false) => SubmissionStatus::PrsFailed,
            (false, false) => SubmissionStatus::BothFailed,
        }
    }
}

/// Run a full submission
///
/// `platform` is `None` when no usable review service could be
/// constructed; pushes still run, only the PR phase is skipped. Fatal
/// structural problems (no repository, checked out on the base branch,
/// unknown base) return `Err`; per-branch push and PR failures are
/// recorded in the report instead.
pub async fn run_submission(
    git: &dyn GitQuery,
    platform: Option<&dyn PlatformService>,
    options: &SubmitOptions,
    progress: &dyn ProgressCallback,
) -> Result<SubmissionReport> {
    let current = git.current_branch().await?;

    let base = match &options.base {
        Some(base) => {
            if !git.branch_exists_locally(base).await {
                return Err(Error::BranchNotFound(base.clone()));
            }
            base.clone()
        }
        None => git.default_branch().await?,
    };

    if current == base {
        return Err(Error::OnBaseBranch(base));
    }

    progress.on_phase(Phase::Detecting).await;
    let stack = detect_stack(git, &current, &base).await?;

    progress
        .on_message(&format!(
            "Stack of {} branch{} on '{}':",
            stack.branches.len(),
            if stack.branches.len() == 1 { "" } else { "es" },
            stack.base_branch,
        ))
        .await;
    for branch in &stack.branches {
        progress
            .on_message(&format!(
                "  {} ({} commit{})",
                branch.name,
                branch.commit_count,
                if branch.commit_count == 1 { "" } else { "s" },
            ))
            .await;
    }

    if options.dry_run {
        report_dry_run(&stack, progress).await;
        return Ok(SubmissionReport {
            stack,
            push: None,
            prs: None,
            dry_run: true,
        });
    }

    progress.on_phase(Phase::Pushing).await;
    let push = push_all_branches(git, &stack.branches, options.allow_force_push, progress).await;

    let prs = match platform {
        None => {
            progress
                .on_message("Skipping pull requests: no usable review service")
                .await;
            None
        }
        Some(service) => {
            if service.is_authenticated().await {
                progress.on_phase(Phase::CreatingPrs).await;
                Some(
                    create_all_prs(git, service, &stack.base_branch, &stack.branches, progress)
                        .await,
                )
            } else {
                progress
                    .on_error(&Error::Auth(
                        "review service not authenticated; skipping pull requests".to_string(),
                    ))
                    .await;
                None
            }
        }
    };

    progress.on_phase(Phase::Complete).await;

    Ok(SubmissionReport {
        stack,
        push: Some(push),
        prs,
        dry_run: false,
    })
}

/// Report what a real run would do
async fn report_dry_run(stack: &StackInfo, progress: &dyn ProgressCallback) {
    progress
        .on_message("Dry run - no changes will be made")
        .await;

    let mut pr_base = stack.base_branch.as_str();
    for branch in &stack.branches {
        progress
            .on_message(&format!(
                "Would push {} and open a PR against {}",
                branch.name, pr_base
            ))
            .await;
        pr_base = branch.name.as_str();
    }
}
