//! CLI command implementations.

mod scrape;

pub use scrape::{crawl, detail, list};

use console::style;

use crate::config::Config;

/// List known content kinds.
pub fn kinds(config: &Config) -> anyhow::Result<()> {
    println!("\n{}", style("Content kinds").bold());
    println!("{}", "-".repeat(40));
    for kind in config.kinds() {
        let source = if config.scrapers.contains_key(&kind) {
            "config file"
        } else {
            "built-in"
        };
        println!("{:<20} {}", kind, style(source).dim());
    }
    Ok(())
}
