//! Remove command - unfavorite a target profile.

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::commands::{build_context, store_failure};
use crate::Cli;

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// ID of the profile to unfavorite.
    pub target_id: String,
}

/// Runs the remove command.
pub async fn run(args: &RemoveArgs, cli: &Cli) -> Result<()> {
    let ctx = build_context(cli)?;

    info!(target_id = %args.target_id, "Removing favorite");
    if !ctx.store.remove_interest(&args.target_id).await {
        return Err(store_failure(&ctx).await);
    }

    if !cli.quiet {
        println!("Unfavorited {}", args.target_id);
    }
    Ok(())
}
