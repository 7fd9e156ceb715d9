//! List command - fetch and display the favorites set.

use anyhow::Result;
use tracing::info;

use crate::commands::{build_context, store_failure};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the list command.
pub async fn run(cli: &Cli) -> Result<()> {
    let ctx = build_context(cli)?;

    info!("Fetching favorites");
    if !ctx.store.refetch().await {
        // A stale cached view is better than nothing when the fetch fails.
        let fallback = ctx.store.fallback_ids().await;
        if !fallback.is_empty() && cli.format == OutputFormat::Text && !cli.quiet {
            eprintln!("Cached favorites (possibly stale):");
            for id in &fallback {
                eprintln!("  {id}");
            }
        }
        return Err(store_failure(&ctx).await);
    }

    let interests = ctx.store.interests().await;
    match cli.format {
        OutputFormat::Json => println!("{}", JsonFormatter::interests(&interests, cli.pretty)?),
        OutputFormat::Text => print!("{}", TextFormatter::interests(&interests)),
    }
    Ok(())
}
