//! Shared helper functions for CLI commands.

use console::style;

use crate::models::{LogLevel, ScrapeLog};

/// Truncate a string for table display.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Print the accumulated scrape diagnostics as a styled panel.
pub fn print_logs(logs: &[ScrapeLog]) {
    if logs.is_empty() {
        return;
    }

    eprintln!("\n{}", style("Scrape log").bold());
    eprintln!("{}", "-".repeat(60));
    for log in logs {
        let tag = match log.level {
            LogLevel::Info => style("info").dim(),
            LogLevel::Warn => style("warn").yellow(),
            LogLevel::Error => style("error").red(),
        };
        match &log.context {
            Some(context) => eprintln!("{:>5}  {} {}", tag, log.message, style(context).dim()),
            None => eprintln!("{:>5}  {}", tag, log.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings_intact() {
        assert_eq!(truncate("Jane Doe", 24), "Jane Doe");
    }

    #[test]
    fn truncate_cuts_on_char_boundaries() {
        let s = "نمایشگاه انفرادی نقاشی";
        let t = truncate(s, 10);
        assert!(t.chars().count() <= 10);
        assert!(t.ends_with('…'));
    }
}
