//! Command-line interface.

mod commands;
mod helpers;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::{Config, Settings};
use crate::scrapers::{GalleryScraper, HttpClient, ScrapeError};

/// Scrape a bilingual gallery site into normalized import records.
#[derive(Parser)]
#[command(name = "artscrape", version, about)]
pub struct Cli {
    /// Path to a TOML config file (settings + scraper overrides).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the HTTP user agent.
    #[arg(long, global = true, env = "ARTSCRAPE_USER_AGENT")]
    pub user_agent: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List known content kinds.
    Kinds,

    /// Discover detail pages from a kind's index page.
    List {
        /// Content kind (artists, exhibitions, news, ...).
        kind: String,
        /// Print the raw result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run a full rich scrape for one slug.
    Detail {
        kind: String,
        slug: String,
        /// Print the full result (record + logs) as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Discover a kind's slugs, then scrape each one (JSONL on stdout).
    Crawl {
        kind: String,
        /// Stop after this many slugs.
        #[arg(long)]
        limit: Option<usize>,
        /// Delay between detail scrapes in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path).await?,
        None => Config::default(),
    };

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    if let Some(user_agent) = cli.user_agent {
        settings.user_agent = user_agent;
    }
    if let Some(timeout) = cli.timeout {
        settings.request_timeout = timeout;
    }

    match cli.command {
        Command::Kinds => commands::kinds(&config),
        Command::List { kind, json } => {
            let scraper = scraper_for(&config, &settings, &kind)?;
            commands::list(&scraper, json).await
        }
        Command::Detail { kind, slug, json } => {
            let scraper = scraper_for(&config, &settings, &kind)?;
            commands::detail(&scraper, &slug, json).await
        }
        Command::Crawl {
            kind,
            limit,
            delay_ms,
        } => {
            let scraper = scraper_for(&config, &settings, &kind)?;
            let delay = Duration::from_millis(delay_ms.unwrap_or(settings.request_delay_ms));
            commands::crawl(&scraper, limit, delay).await
        }
    }
}

/// Resolve a kind parameter to a ready scraper. Unknown kinds are the
/// one hard error in the system.
fn scraper_for(
    config: &Config,
    settings: &Settings,
    kind: &str,
) -> anyhow::Result<GalleryScraper> {
    let scraper_config = config
        .scraper(kind)
        .ok_or_else(|| ScrapeError::UnknownKind(kind.to_string()))?;

    let client = Arc::new(HttpClient::new(
        &settings.user_agent,
        Duration::from_secs(settings.request_timeout),
    ));

    Ok(GalleryScraper::new(scraper_config, client)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_is_a_hard_error() {
        let err = scraper_for(&Config::default(), &Settings::default(), "sculptures")
            .unwrap_err();
        assert!(err.to_string().contains("sculptures"));
    }

    #[test]
    fn builtin_kinds_resolve() {
        for kind in ["artists", "exhibitions", "news"] {
            assert!(scraper_for(&Config::default(), &Settings::default(), kind).is_ok());
        }
    }
}
