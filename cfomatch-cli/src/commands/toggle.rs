//! Toggle command - flip favorite membership for a target profile.

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::commands::{build_context, parse_target_type, store_failure};
use crate::Cli;

/// Arguments for the toggle command.
#[derive(Args)]
pub struct ToggleArgs {
    /// ID of the profile to toggle.
    pub target_id: String,

    /// Target type (cfo or company), used when the toggle adds.
    #[arg(long = "type", short = 't', default_value = "cfo")]
    pub target_type: String,
}

/// Runs the toggle command.
pub async fn run(args: &ToggleArgs, cli: &Cli) -> Result<()> {
    let target_type = parse_target_type(&args.target_type)?;
    let ctx = build_context(cli)?;

    // The toggle direction comes from current membership, so the set must
    // be loaded first.
    if !ctx.store.ensure_loaded().await {
        return Err(store_failure(&ctx).await);
    }

    info!(target_id = %args.target_id, "Toggling favorite");
    if !ctx.store.toggle_interest(&args.target_id, target_type).await {
        return Err(store_failure(&ctx).await);
    }

    if !cli.quiet {
        if ctx.store.is_interested(&args.target_id).await {
            println!("Favorited {}", args.target_id);
        } else {
            println!("Unfavorited {}", args.target_id);
        }
    }
    Ok(())
}
