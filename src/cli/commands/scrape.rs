//! Scrape commands: list discovery, single detail, bulk crawl.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::models::LogLevel;
use crate::scrapers::GalleryScraper;

use super::super::helpers::{print_logs, truncate};

/// Run list discovery and print the discovered items.
pub async fn list(scraper: &GalleryScraper, json: bool) -> anyhow::Result<()> {
    let result = scraper.fetch_list().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.items.is_empty() {
        println!(
            "{} No detail pages discovered. Check the log panel below.",
            style("!").yellow()
        );
        print_logs(&result.logs);
        return Ok(());
    }

    println!("\n{}", style("Discovered items").bold());
    println!("{}", "-".repeat(72));
    println!("{:<28} {:<30} URL", "Slug", "Name");
    println!("{}", "-".repeat(72));
    for item in &result.items {
        println!(
            "{:<28} {:<30} {}",
            truncate(&item.slug, 27),
            truncate(&item.name_en, 29),
            item.source_url_en
        );
    }
    println!("\n{} items", result.items.len());

    print_logs(&result.logs);
    Ok(())
}

/// Run a full rich scrape for one slug and print the record.
pub async fn detail(scraper: &GalleryScraper, slug: &str, json: bool) -> anyhow::Result<()> {
    let result = scraper.scrape_detail(slug).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&result.data)?);
    print_logs(&result.logs);
    Ok(())
}

/// Discover every slug of a kind and scrape each one, writing one JSON
/// record per line to stdout. The engine itself does no throttling;
/// the delay between detail scrapes lives here with the bulk caller.
pub async fn crawl(
    scraper: &GalleryScraper,
    limit: Option<usize>,
    delay: Duration,
) -> anyhow::Result<()> {
    let discovered = scraper.fetch_list().await;
    if discovered.items.is_empty() {
        eprintln!("{} Nothing discovered; not crawling.", style("!").yellow());
        print_logs(&discovered.logs);
        return Ok(());
    }

    let total = limit
        .unwrap_or(discovered.items.len())
        .min(discovered.items.len());

    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut warnings = 0usize;
    let mut errors = 0usize;

    for (index, item) in discovered.items.iter().take(total).enumerate() {
        progress.set_message(item.slug.clone());

        let result = scraper.scrape_detail(&item.slug).await;
        warnings += result
            .logs
            .iter()
            .filter(|log| log.level == LogLevel::Warn)
            .count();
        errors += result
            .logs
            .iter()
            .filter(|log| log.level == LogLevel::Error)
            .count();

        println!("{}", serde_json::to_string(&result.data)?);
        progress.inc(1);

        if index + 1 < total && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    progress.finish_with_message("done");
    eprintln!(
        "{} Scraped {} slugs ({} warnings, {} errors logged)",
        style("✓").green(),
        total,
        warnings,
        errors
    );
    Ok(())
}
