//! Mock version-control backend for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use stackup::error::{Error, Result};
use stackup::git::GitQuery;
use stackup::types::{GitRemote, PushStrategy};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory branch graph implementing `GitQuery`
///
/// Features:
/// - Builder-style setup for branches, ancestry, counts, and messages
/// - Pushes are recorded and, on success, make the branch visible to
///   `branch_exists_remotely`
/// - Error injection per (branch, strategy) push and per commit-count /
///   remote-check lookup
pub struct MockGit {
    current: String,
    default_branch: String,
    branches: Vec<String>,
    ancestry: HashSet<(String, String)>,
    counts: HashMap<(String, String), u32>,
    messages: HashMap<(String, String), Vec<String>>,
    count_errors: HashSet<(String, String)>,
    remote_check_errors: HashSet<String>,
    remote_branches: Mutex<HashSet<String>>,
    push_failures: HashMap<(String, PushStrategy), String>,
    push_calls: Mutex<Vec<(String, PushStrategy)>>,
}

impl MockGit {
    /// Create a mock repository with `current` checked out on top of `main`
    pub fn new(current: &str) -> Self {
        Self {
            current: current.to_string(),
            default_branch: "main".to_string(),
            branches: vec!["main".to_string(), current.to_string()],
            ancestry: HashSet::new(),
            counts: HashMap::new(),
            messages: HashMap::new(),
            count_errors: HashSet::new(),
            remote_check_errors: HashSet::new(),
            remote_branches: Mutex::new(HashSet::new()),
            push_failures: HashMap::new(),
            push_calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a local branch
    #[must_use]
    pub fn branch(mut self, name: &str) -> Self {
        self.branches.push(name.to_string());
        self
    }

    /// Record that `ancestor` is an ancestor of `descendant`
    #[must_use]
    pub fn ancestor_of(mut self, ancestor: &str, descendant: &str) -> Self {
        self.ancestry
            .insert((ancestor.to_string(), descendant.to_string()));
        self
    }

    /// Set the commit count of `branch` relative to `base`
    #[must_use]
    pub fn count(mut self, base: &str, branch: &str, n: u32) -> Self {
        self.counts
            .insert((base.to_string(), branch.to_string()), n);
        self
    }

    /// Set the unique commit subjects of `branch` relative to `base`,
    /// oldest first
    #[must_use]
    pub fn subjects(mut self, base: &str, branch: &str, subjects: &[&str]) -> Self {
        self.messages.insert(
            (base.to_string(), branch.to_string()),
            subjects.iter().map(ToString::to_string).collect(),
        );
        self
    }

    /// Mark a branch as already existing on the remote
    #[must_use]
    pub fn on_remote(self, name: &str) -> Self {
        self.remote_branches.lock().unwrap().insert(name.to_string());
        self
    }

    /// Make the commit-count lookup for (base, branch) fail
    #[must_use]
    pub fn count_fails(mut self, base: &str, branch: &str) -> Self {
        self.count_errors
            .insert((base.to_string(), branch.to_string()));
        self
    }

    /// Make the remote-existence check for a branch fail
    #[must_use]
    pub fn remote_check_fails(mut self, name: &str) -> Self {
        self.remote_check_errors.insert(name.to_string());
        self
    }

    /// Make one push strategy fail for a branch
    #[must_use]
    pub fn push_fails(mut self, name: &str, strategy: PushStrategy, msg: &str) -> Self {
        self.push_failures
            .insert((name.to_string(), strategy), msg.to_string());
        self
    }

    /// Get all recorded pushes as (branch, strategy) pairs
    pub fn get_push_calls(&self) -> Vec<(String, PushStrategy)> {
        self.push_calls.lock().unwrap().clone()
    }

    /// Assert a strategy was never attempted for a branch
    pub fn assert_never_pushed_with(&self, name: &str, strategy: PushStrategy) {
        let calls = self.get_push_calls();
        assert!(
            !calls.contains(&(name.to_string(), strategy)),
            "Expected no {strategy} push of {name} but got: {calls:?}"
        );
    }
}

#[async_trait]
impl GitQuery for MockGit {
    async fn current_branch(&self) -> Result<String> {
        Ok(self.current.clone())
    }

    async fn local_branches(&self) -> Result<Vec<String>> {
        Ok(self.branches.clone())
    }

    async fn branch_exists_locally(&self, name: &str) -> bool {
        self.branches.iter().any(|b| b == name)
    }

    async fn branch_exists_remotely(&self, name: &str) -> Result<bool> {
        if self.remote_check_errors.contains(name) {
            return Err(Error::CommandFailed(format!("ls-remote failed for {name}")));
        }
        Ok(self.remote_branches.lock().unwrap().contains(name))
    }

    async fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        Ok(self
            .ancestry
            .contains(&(ancestor.to_string(), descendant.to_string())))
    }

    async fn commit_count(&self, base: &str, branch: &str) -> Result<u32> {
        let key = (base.to_string(), branch.to_string());
        if self.count_errors.contains(&key) {
            return Err(Error::CommandFailed(format!(
                "rev-list --count {base}..{branch}"
            )));
        }
        Ok(self.counts.get(&key).copied().unwrap_or(0))
    }

    async fn commit_messages(&self, base: &str, branch: &str) -> Result<Vec<String>> {
        Ok(self
            .messages
            .get(&(base.to_string(), branch.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn push(&self, branch: &str, strategy: PushStrategy) -> Result<()> {
        self.push_calls
            .lock()
            .unwrap()
            .push((branch.to_string(), strategy));

        if let Some(msg) = self.push_failures.get(&(branch.to_string(), strategy)) {
            return Err(Error::PushFailed {
                branch: branch.to_string(),
                message: msg.clone(),
            });
        }

        self.remote_branches
            .lock()
            .unwrap()
            .insert(branch.to_string());
        Ok(())
    }

    async fn remotes(&self) -> Result<Vec<GitRemote>> {
        Ok(vec![GitRemote {
            name: "origin".to_string(),
            url: "https://github.com/testowner/testrepo.git".to_string(),
        }])
    }

    async fn default_branch(&self) -> Result<String> {
        Ok(self.default_branch.clone())
    }
}
