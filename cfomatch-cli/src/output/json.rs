//! JSON output formatting for scripting.

use anyhow::Result;
use serde::Serialize;

use cfomatch_core::{Interest, InterestStats};

/// JSON formatter.
pub struct JsonFormatter;

impl JsonFormatter {
    /// Serializes the favorites list.
    pub fn interests(interests: &[Interest], pretty: bool) -> Result<String> {
        Self::render(&interests, pretty)
    }

    /// Serializes the per-type counts.
    pub fn stats(stats: &InterestStats, pretty: bool) -> Result<String> {
        Self::render(stats, pretty)
    }

    fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
        let output = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(output)
    }
}
