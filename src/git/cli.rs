//! Git CLI adapter
//!
//! Implements [`GitQuery`] by invoking the `git` binary through the
//! subprocess runner. Plumbing commands only, so output stays parseable.

use crate::error::{Error, Result};
use crate::git::GitQuery;
use crate::process::{self, CommandOutput};
use crate::types::{GitRemote, PushStrategy};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`GitQuery`] implementation backed by the `git` executable
#[derive(Debug)]
pub struct CliGit {
    root: PathBuf,
    remote: String,
}

impl CliGit {
    /// Open a repository at `path`, verifying git is available and the
    /// path is inside a work tree
    ///
    /// The push remote defaults to `origin`; see [`Self::set_remote`].
    pub async fn open(path: &Path) -> Result<Self> {
        let probe = process::run("git", &["rev-parse", "--git-dir"], path)
            .await
            .map_err(|e| Error::GitUnavailable(e.to_string()))?;

        if !probe.success {
            return Err(Error::NotARepo);
        }

        Ok(Self {
            root: path.to_path_buf(),
            remote: "origin".to_string(),
        })
    }

    /// Select the remote used for pushes and remote-existence checks
    pub fn set_remote(&mut self, name: &str) {
        name.clone_into(&mut self.remote);
    }

    /// The remote currently selected for pushes
    pub fn remote(&self) -> &str {
        &self.remote
    }

    async fn git(&self, args: &[&str]) -> Result<CommandOutput> {
        process::run("git", args, &self.root).await
    }
}

#[async_trait]
impl GitQuery for CliGit {
    async fn current_branch(&self) -> Result<String> {
        let out = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        if !out.success {
            return Err(Error::NotARepo);
        }
        Ok(out.stdout)
    }

    async fn local_branches(&self) -> Result<Vec<String>> {
        let out = self
            .git(&["for-each-ref", "--format=%(refname:short)", "refs/heads"])
            .await?;
        if !out.success {
            return Err(Error::CommandFailed(out.message().to_string()));
        }
        Ok(out
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    async fn branch_exists_locally(&self, name: &str) -> bool {
        let refname = format!("refs/heads/{name}");
        self.git(&["rev-parse", "--verify", "--quiet", &refname])
            .await
            .is_ok_and(|out| out.success)
    }

    async fn branch_exists_remotely(&self, name: &str) -> Result<bool> {
        let refname = format!("refs/heads/{name}");
        let out = self
            .git(&["ls-remote", "--exit-code", "--heads", &self.remote, &refname])
            .await?;

        // ls-remote --exit-code exits 2 when no matching refs exist
        match out.code {
            Some(0) => Ok(true),
            Some(2) => Ok(false),
            _ => Err(Error::CommandFailed(format!(
                "ls-remote {}: {}",
                self.remote,
                out.message()
            ))),
        }
    }

    async fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        let out = self
            .git(&["merge-base", "--is-ancestor", ancestor, descendant])
            .await?;

        match out.code {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(Error::CommandFailed(format!(
                "merge-base --is-ancestor {ancestor} {descendant}: {}",
                out.message()
            ))),
        }
    }

    async fn commit_count(&self, base: &str, branch: &str) -> Result<u32> {
        let range = format!("{base}..{branch}");
        let out = self.git(&["rev-list", "--count", &range]).await?;
        if !out.success {
            return Err(Error::CommandFailed(format!(
                "rev-list --count {range}: {}",
                out.message()
            )));
        }
        out.stdout
            .parse()
            .map_err(|_| Error::Parse(format!("unexpected rev-list output: {}", out.stdout)))
    }

    async fn commit_messages(&self, base: &str, branch: &str) -> Result<Vec<String>> {
        let range = format!("{base}..{branch}");
        let out = self
            .git(&["log", "--reverse", "--format=%s", &range])
            .await?;
        if !out.success {
            return Err(Error::CommandFailed(format!(
                "log {range}: {}",
                out.message()
            )));
        }
        Ok(out
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    async fn push(&self, branch: &str, strategy: PushStrategy) -> Result<()> {
        let mut args = vec!["push"];
        if let Some(flag) = strategy.flag() {
            args.push(flag);
        }
        args.push(&self.remote);
        args.push(branch);

        debug!("pushing {branch} ({strategy})");
        let out = self.git(&args).await?;
        if out.success {
            Ok(())
        } else {
            Err(Error::PushFailed {
                branch: branch.to_string(),
                message: out.message().to_string(),
            })
        }
    }

    async fn remotes(&self) -> Result<Vec<GitRemote>> {
        let out = self.git(&["remote", "-v"]).await?;
        if !out.success {
            return Err(Error::CommandFailed(out.message().to_string()));
        }

        let mut remotes: Vec<GitRemote> = Vec::new();
        for line in out.stdout.lines() {
            let mut fields = line.split_whitespace();
            let (Some(name), Some(url)) = (fields.next(), fields.next()) else {
                continue;
            };
            if remotes.iter().any(|r| r.name == name) {
                continue;
            }
            remotes.push(GitRemote {
                name: name.to_string(),
                url: url.to_string(),
            });
        }
        Ok(remotes)
    }

    async fn default_branch(&self) -> Result<String> {
        let headref = format!("refs/remotes/{}/HEAD", self.remote);
        let out = self.git(&["symbolic-ref", "--short", &headref]).await?;
        if out.success {
            let prefix = format!("{}/", self.remote);
            let name = out.stdout.strip_prefix(&prefix).unwrap_or(&out.stdout);
            return Ok(name.to_string());
        }

        // No remote HEAD recorded; fall back to conventional trunk names
        for candidate in ["main", "master"] {
            if self.branch_exists_locally(candidate).await {
                return Ok(candidate.to_string());
            }
        }

        Err(Error::Parse(
            "cannot determine default branch (tried remote HEAD, main, master)".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn git(dir: &Path, args: &[&str]) {
        let out = process::run("git", args, dir).await.unwrap();
        assert!(out.success, "git {args:?} failed: {}", out.message());
    }

    async fn setup_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        git(dir, &["init", "-b", "main"]).await;
        git(dir, &["config", "user.email", "test@test.com"]).await;
        git(dir, &["config", "user.name", "Test"]).await;
        git(dir, &["commit", "--allow-empty", "-m", "init"]).await;
        temp
    }

    async fn commit(dir: &Path, message: &str) {
        git(dir, &["commit", "--allow-empty", "-m", message]).await;
    }

    #[tokio::test]
    async fn open_rejects_non_repo() {
        let temp = TempDir::new().unwrap();
        let err = CliGit::open(temp.path()).await.unwrap_err();
        assert!(matches!(err, Error::NotARepo));
    }

    #[tokio::test]
    async fn reports_current_branch() {
        let temp = setup_repo().await;
        let repo = CliGit::open(temp.path()).await.unwrap();
        assert_eq!(repo.current_branch().await.unwrap(), "main");
    }

    #[tokio::test]
    async fn lists_local_branches() {
        let temp = setup_repo().await;
        git(temp.path(), &["branch", "feature"]).await;

        let repo = CliGit::open(temp.path()).await.unwrap();
        let branches = repo.local_branches().await.unwrap();
        assert!(branches.contains(&"main".to_string()));
        assert!(branches.contains(&"feature".to_string()));
    }

    #[tokio::test]
    async fn checks_local_branch_existence() {
        let temp = setup_repo().await;
        let repo = CliGit::open(temp.path()).await.unwrap();
        assert!(repo.branch_exists_locally("main").await);
        assert!(!repo.branch_exists_locally("nope").await);
    }

    #[tokio::test]
    async fn ancestry_follows_branch_history() {
        let temp = setup_repo().await;
        let dir = temp.path();
        git(dir, &["checkout", "-b", "feature"]).await;
        commit(dir, "work").await;

        let repo = CliGit::open(dir).await.unwrap();
        assert!(repo.is_ancestor("main", "feature").await.unwrap());
        assert!(!repo.is_ancestor("feature", "main").await.unwrap());
    }

    #[tokio::test]
    async fn counts_unique_commits() {
        let temp = setup_repo().await;
        let dir = temp.path();
        git(dir, &["checkout", "-b", "feature"]).await;
        commit(dir, "one").await;
        commit(dir, "two").await;

        let repo = CliGit::open(dir).await.unwrap();
        assert_eq!(repo.commit_count("main", "feature").await.unwrap(), 2);
        assert_eq!(repo.commit_count("main", "main").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn commit_messages_are_oldest_first() {
        let temp = setup_repo().await;
        let dir = temp.path();
        git(dir, &["checkout", "-b", "feature"]).await;
        commit(dir, "first change").await;
        commit(dir, "second change").await;

        let repo = CliGit::open(dir).await.unwrap();
        let messages = repo.commit_messages("main", "feature").await.unwrap();
        assert_eq!(messages, vec!["first change", "second change"]);
    }

    #[tokio::test]
    async fn default_branch_falls_back_to_main() {
        let temp = setup_repo().await;
        let repo = CliGit::open(temp.path()).await.unwrap();
        assert_eq!(repo.default_branch().await.unwrap(), "main");
    }

    #[tokio::test]
    async fn lists_remotes_deduplicated() {
        let temp = setup_repo().await;
        let dir = temp.path();
        git(
            dir,
            &["remote", "add", "origin", "https://github.com/owner/repo.git"],
        )
        .await;

        let repo = CliGit::open(dir).await.unwrap();
        let remotes = repo.remotes().await.unwrap();
        assert_eq!(remotes.len(), 1);
        assert_eq!(remotes[0].name, "origin");
        assert_eq!(remotes[0].url, "https://github.com/owner/repo.git");
    }
}
