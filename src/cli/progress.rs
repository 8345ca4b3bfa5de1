//! CLI progress callback with styled output

use crate::cli::style::{check, cross, hyperlink_url, Stream, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use stackup::error::Error;
use stackup::submit::{Phase, PrOutcome, ProgressCallback, PushStatus};
use stackup::types::PullRequest;

/// Progress callback that prints one styled line per event
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Complete => println!("{}", phase.to_string().emphasis()),
            _ => println!("{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_branch_push(&self, branch: &str, status: PushStatus) {
        match &status {
            PushStatus::Started => {
                println!("  Pushing {}...", branch.accent());
            }
            PushStatus::Success => {
                println!("  {} Pushed {}", check(), branch.emphasis());
            }
            PushStatus::Skipped => {
                println!(
                    "  {} {} {}",
                    "-".muted(),
                    branch.accent(),
                    status.to_string().muted()
                );
            }
            PushStatus::Failed(_) => {
                eprintln!(
                    "  {} {} {}",
                    cross(),
                    branch.accent().for_stderr(),
                    status.to_string().error()
                );
            }
        }
    }

    async fn on_pr_created(&self, branch: &str, pr: &PullRequest) {
        let pr_num = format!("#{}", pr.number);
        println!(
            "  {} Created PR {} for {}",
            check(),
            pr_num.accent(),
            branch.emphasis()
        );
        println!("    {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    }

    async fn on_pr_outcome(&self, branch: &str, outcome: &PrOutcome) {
        match outcome {
            PrOutcome::AlreadyExists(pr) => {
                println!(
                    "  {} PR for {} {}",
                    check(),
                    branch.emphasis(),
                    outcome.to_string().muted()
                );
                println!("    {}", hyperlink_url(Stream::Stdout, &pr.html_url));
            }
            PrOutcome::Failed(_) => {
                eprintln!(
                    "  {} {} {}",
                    cross(),
                    branch.accent().for_stderr(),
                    outcome.to_string().error()
                );
            }
            _ => {
                println!(
                    "  {} {} {}",
                    "-".muted(),
                    branch.accent(),
                    outcome.to_string().muted()
                );
            }
        }
    }

    async fn on_error(&self, err: &Error) {
        eprintln!("{}: {}", "error".error(), err);
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}
