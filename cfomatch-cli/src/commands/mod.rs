//! CLI commands.

pub mod add;
pub mod list;
pub mod remove;
pub mod stats;
pub mod toggle;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use cfomatch_client::{ApiClient, InterestsClient, SessionBridge};
use cfomatch_core::{Session, TargetType};
use cfomatch_store::{FallbackCache, InterestStore};

use crate::{Cli, ExitCode};

/// The assembled client stack a command operates on.
pub struct AppContext {
    /// The favorites store over the HTTP interests client.
    pub store: InterestStore<InterestsClient>,
}

/// Builds the client stack from the global CLI options.
///
/// Exits with [`ExitCode::Unauthorized`] when credentials are missing;
/// every command here needs them.
pub fn build_context(cli: &Cli) -> Result<AppContext> {
    let bridge = SessionBridge::new();
    match (&cli.token, &cli.user_id) {
        (Some(token), Some(user_id)) => {
            bridge.on_session_change(Some(Session::new(user_id, token)));
        }
        _ => {
            if !cli.quiet {
                eprintln!(
                    "Error: credentials required; pass --token and --user-id \
                     or set CFOMATCH_TOKEN and CFOMATCH_USER_ID"
                );
            }
            std::process::exit(ExitCode::Unauthorized as i32);
        }
    }

    debug!(base_url = %cli.base_url, "Building client");
    let client = ApiClient::builder()
        .base_url(cli.base_url.clone())
        .timeout(Duration::from_secs(cli.timeout))
        .session(bridge.subscribe())
        .build()?;

    let api = Arc::new(InterestsClient::new(Arc::new(client)));
    let store = InterestStore::new(api, bridge.subscribe())
        .with_fallback(FallbackCache::default_location());
    Ok(AppContext { store })
}

/// Parses a target type argument.
pub fn parse_target_type(arg: &str) -> Result<TargetType> {
    match arg.to_lowercase().as_str() {
        "cfo" => Ok(TargetType::Cfo),
        "company" => Ok(TargetType::Company),
        other => anyhow::bail!("unknown target type '{other}' (expected 'cfo' or 'company')"),
    }
}

/// Converts a failed store operation into an error carrying the stored
/// message.
pub async fn store_failure(ctx: &AppContext) -> anyhow::Error {
    let message = ctx
        .store
        .error()
        .await
        .unwrap_or_else(|| "operation failed".to_string());
    anyhow::anyhow!(message)
}
