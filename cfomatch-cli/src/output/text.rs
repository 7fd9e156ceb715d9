//! Text output formatting.

use chrono::Local;

use cfomatch_core::{Interest, InterestStats};

/// Human-readable text formatter.
pub struct TextFormatter;

impl TextFormatter {
    /// Formats the favorites list, one row per interest.
    pub fn interests(interests: &[Interest]) -> String {
        if interests.is_empty() {
            return "No favorites yet.\n".to_string();
        }

        let mut lines = Vec::with_capacity(interests.len() + 1);
        lines.push(format!("{:<24} {:<8} {:<20} {}", "TARGET", "TYPE", "NAME", "ADDED"));
        for interest in interests {
            let name = interest.target_name.as_deref().unwrap_or("-");
            let added = interest
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M");
            lines.push(format!(
                "{:<24} {:<8} {:<20} {}",
                interest.target_id, interest.target_type, name, added
            ));
        }
        lines.push(String::new());
        lines.join("\n")
    }

    /// Formats the per-type counts.
    pub fn stats(stats: &InterestStats) -> String {
        format!(
            "Favorites: {}\n  CFOs:      {}\n  Companies: {}\n",
            stats.total_count, stats.cfo_count, stats.company_count
        )
    }
}
