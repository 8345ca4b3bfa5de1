//! Submit command - push the stack and open chained pull requests

use crate::cli::progress::CliProgress;
use crate::cli::style::Stylize;
use anstream::{eprintln, println};
use stackup::error::{Error, Result};
use stackup::git::{CliGit, GitQuery};
use stackup::platform::{create_platform_service, parse_repo_info, PlatformService};
use stackup::submit::{force_push_from_env, run_submission, SubmitOptions};
use stackup::types::GitRemote;
use std::path::Path;

/// Run the submit command
pub async fn run_submit(
    path: &Path,
    base: Option<&str>,
    remote: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let mut repo = CliGit::open(path).await?;

    let remotes = repo.remotes().await?;
    if remotes.is_empty() {
        return Err(Error::NoSupportedRemotes);
    }

    let remote_name = select_remote(&remotes, remote)?;
    repo.set_remote(&remote_name);

    // A broken review-service setup must not block pushes; degrade to a
    // push-only run with a warning.
    let remote_info = remotes
        .iter()
        .find(|r| r.name == remote_name)
        .ok_or_else(|| Error::RemoteNotFound(remote_name.clone()))?;

    let platform: Option<Box<dyn PlatformService>> = match parse_repo_info(&remote_info.url) {
        Ok(config) => match create_platform_service(&config).await {
            Ok(service) => Some(service),
            Err(e) => {
                eprintln!("{}", format!("warning: {e}").warn());
                None
            }
        },
        Err(e) => {
            eprintln!("{}", format!("warning: {e}").warn());
            None
        }
    };

    let options = SubmitOptions {
        base: base.map(ToString::to_string),
        allow_force_push: force_push_from_env(),
        dry_run,
    };

    let progress = CliProgress;
    let report = run_submission(&repo, platform.as_deref(), &options, &progress).await?;

    if !report.dry_run {
        let status = report.status();
        println!();
        if status.is_success() {
            println!("{}", status.message().success());
        } else {
            eprintln!("{}", status.message().warn());
        }
    }

    // Per-branch failures are reported above; only structural problems
    // change the exit code.
    Ok(())
}

/// Pick the remote to push to: explicit flag, sole remote, or origin
fn select_remote(remotes: &[GitRemote], requested: Option<&str>) -> Result<String> {
    if let Some(name) = requested {
        if !remotes.iter().any(|r| r.name == name) {
            return Err(Error::RemoteNotFound(name.to_string()));
        }
        return Ok(name.to_string());
    }

    if remotes.len() == 1 {
        return Ok(remotes[0].name.clone());
    }

    Ok(remotes
        .iter()
        .find(|r| r.name == "origin")
        .map_or_else(|| remotes[0].name.clone(), |r| r.name.clone()))
}
