//! Stats command - favorite counts by target type.

use anyhow::Result;
use tracing::info;

use crate::commands::{build_context, store_failure};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the stats command.
pub async fn run(cli: &Cli) -> Result<()> {
    let ctx = build_context(cli)?;

    info!("Fetching favorites for stats");
    if !ctx.store.refetch().await {
        return Err(store_failure(&ctx).await);
    }

    let stats = ctx.store.stats().await;
    match cli.format {
        OutputFormat::Json => println!("{}", JsonFormatter::stats(&stats, cli.pretty)?),
        OutputFormat::Text => print!("{}", TextFormatter::stats(&stats)),
    }
    Ok(())
}
