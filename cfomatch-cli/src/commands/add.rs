//! Add command - favorite a target profile.

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::commands::{build_context, parse_target_type, store_failure};
use crate::Cli;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// ID of the profile to favorite.
    pub target_id: String,

    /// Target type (cfo or company).
    #[arg(long = "type", short = 't', default_value = "cfo")]
    pub target_type: String,
}

/// Runs the add command.
pub async fn run(args: &AddArgs, cli: &Cli) -> Result<()> {
    let target_type = parse_target_type(&args.target_type)?;
    let ctx = build_context(cli)?;

    info!(target_id = %args.target_id, %target_type, "Adding favorite");
    if !ctx.store.add_interest(&args.target_id, target_type).await {
        return Err(store_failure(&ctx).await);
    }

    if !cli.quiet {
        println!("Favorited {} ({target_type})", args.target_id);
    }
    Ok(())
}
