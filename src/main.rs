//! stackup - stacked pull requests for git
//!
//! CLI binary for submitting branch stacks as chained PRs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "stackup")]
#[command(about = "Submit stacked git branches as chained pull requests")]
#[command(version)]
struct Cli {
    /// Path to the git repository (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Push the current stack and open chained pull requests
    Submit {
        /// Base (trunk) branch; detected from the remote when omitted
        #[arg(long)]
        base: Option<String>,

        /// Git remote to push to
        #[arg(long)]
        remote: Option<String>,

        /// Show what would be done without making changes
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));

    match args.command {
        // Submitting is the default action
        None => {
            cli::run_submit(&path, None, None, false).await?;
        }
        Some(Commands::Submit {
            base,
            remote,
            dry_run,
        }) => {
            cli::run_submit(&path, base.as_deref(), remote.as_deref(), dry_run).await?;
        }
    }

    Ok(())
}
