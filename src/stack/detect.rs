//! Stack detector
//!
//! Given the current branch and the trunk, finds every local branch that
//! sits on the ancestor chain between them and orders the result by
//! distance ahead of trunk.

use crate::error::Result;
use crate::git::GitQuery;
use crate::types::{Branch, StackInfo};
use tracing::{debug, warn};

/// Find the ordered sequence of branches that form the stack
///
/// Candidate rules:
/// - `current` is always a member, even with zero unique commits.
/// - Any other local branch (except `base`) is a member iff it is an
///   ancestor of `current` and has at least one commit that `base` does
///   not have. Branches sitting exactly at trunk contribute nothing and
///   are excluded.
/// - A failed ancestry or commit-count probe drops that candidate and
///   detection continues.
///
/// The result is stable-sorted ascending by commit count, so tied
/// branches keep their discovery order.
pub async fn find_stack_branches(
    git: &dyn GitQuery,
    current: &str,
    base: &str,
) -> Result<Vec<Branch>> {
    let mut names: Vec<String> = vec![current.to_string()];

    for name in git.local_branches().await? {
        if name == current || name == base {
            continue;
        }

        let related = match git.is_ancestor(&name, current).await {
            Ok(related) => related,
            Err(e) => {
                warn!("dropping candidate {name}: ancestry check failed: {e}");
                continue;
            }
        };
        if !related {
            debug!("excluding {name}: not an ancestor of {current}");
            continue;
        }

        match git.commit_count(base, &name).await {
            Ok(0) => debug!("excluding {name}: no commits ahead of {base}"),
            Ok(_) => names.push(name),
            Err(e) => warn!("dropping candidate {name}: commit count failed: {e}"),
        }
    }

    let mut branches = Vec::with_capacity(names.len());
    for name in names {
        let commit_count = match git.commit_count(base, &name).await {
            Ok(count) => count,
            Err(e) if name == current => {
                // The current branch is always part of the stack; a failed
                // count degrades it to the single-node case.
                warn!("commit count failed for {name}: {e}");
                0
            }
            Err(e) => {
                warn!("dropping candidate {name}: commit count failed: {e}");
                continue;
            }
        };
        branches.push(Branch { name, commit_count });
    }

    branches.sort_by_key(|b| b.commit_count);

    debug!(
        "detected stack: {:?}",
        branches
            .iter()
            .map(|b| format!("{} ({})", b.name, b.commit_count))
            .collect::<Vec<_>>()
    );

    Ok(branches)
}

/// Detect the full stack snapshot for `current` on top of `base`
pub async fn detect_stack(git: &dyn GitQuery, current: &str, base: &str) -> Result<StackInfo> {
    let branches = find_stack_branches(git, current, base).await?;
    Ok(StackInfo {
        base_branch: base.to_string(),
        current_branch: current.to_string(),
        branches,
    })
}
