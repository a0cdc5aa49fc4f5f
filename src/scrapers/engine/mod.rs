//! The scraping engine.
//!
//! One [`GalleryScraper`] wraps a [`ScraperConfig`] and a fetch
//! primitive. `fetch_list` discovers detail-page slugs from the index
//! page; `scrape_detail` runs the four sub-scrapes (both locales,
//! media, metadata) concurrently and merges them into a
//! [`ScrapedRich`] record with English-as-fallback for empty alternate
//! locale fields.

pub(crate) mod classify;
pub(crate) mod dates;
mod discovery;
pub(crate) mod dom;
mod locale;
mod media;
mod metadata;

use std::sync::{Arc, Mutex};

use url::Url;

use crate::config::ScraperConfig;
use crate::models::{
    Locale, LogLevel, ScrapeLog, ScrapeResult, ScrapedLocale, ScrapedRich,
};

use super::http::Fetcher;
use super::ScrapeError;

/// Accumulates out-of-band diagnostics during one scrape invocation.
///
/// Interior mutability lets the concurrent sub-scrapes share one sink;
/// warnings and errors are mirrored to `tracing` for operators tailing
/// a bulk run.
pub(crate) struct LogCollector {
    kind: &'static str,
    entries: Mutex<Vec<ScrapeLog>>,
}

impl LogCollector {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn push(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: Option<serde_json::Value>,
    ) {
        let message = message.into();
        match level {
            LogLevel::Info => tracing::debug!(kind = self.kind, "{}", message),
            LogLevel::Warn => tracing::warn!(kind = self.kind, context = ?context, "{}", message),
            LogLevel::Error => tracing::error!(kind = self.kind, context = ?context, "{}", message),
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(ScrapeLog {
                level,
                message,
                context,
            });
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(LogLevel::Info, message, None);
    }

    pub fn warn(&self, message: impl Into<String>, context: Option<serde_json::Value>) {
        self.push(LogLevel::Warn, message, context);
    }

    pub fn error(&self, message: impl Into<String>, context: Option<serde_json::Value>) {
        self.push(LogLevel::Error, message, context);
    }

    fn reset(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    fn drain(&self) -> Vec<ScrapeLog> {
        self.entries
            .lock()
            .map(|mut entries| std::mem::take(&mut *entries))
            .unwrap_or_default()
    }
}

/// Config-driven scraper for one content kind.
pub struct GalleryScraper {
    pub(crate) config: ScraperConfig,
    pub(crate) base: Url,
    pub(crate) fetcher: Arc<dyn Fetcher>,
    pub(crate) logs: LogCollector,
}

impl std::fmt::Debug for GalleryScraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryScraper")
            .field("config", &self.config)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl GalleryScraper {
    /// Create a scraper from a config and a fetch primitive.
    ///
    /// # Errors
    /// Returns [`ScrapeError::InvalidConfig`] if the configured base
    /// URL does not parse — a config mistake, not a scraping condition.
    pub fn new(config: ScraperConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self, ScrapeError> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            ScrapeError::InvalidConfig(format!("bad base URL {:?}: {}", config.base_url, e))
        })?;

        Ok(Self {
            logs: LogCollector::new(config.kind.as_str()),
            config,
            base,
            fetcher,
        })
    }

    /// Resolve an href against the configured base URL.
    pub(crate) fn abs(&self, href: &str) -> Option<String> {
        dom::absolutize(&self.base, href)
    }

    /// Run a full rich scrape for one slug.
    ///
    /// The four sub-scrapes run concurrently with independent failure
    /// domains; a failed branch degrades to an empty result and one
    /// logged error, never cancelling its siblings.
    pub async fn scrape_detail(&self, slug: &str) -> ScrapeResult {
        self.logs.reset();
        self.logs.info(format!(
            "Starting rich scrape for {}/{}",
            self.config.kind, slug
        ));

        let (mut en_locale, mut fa_raw, media, props) = tokio::join!(
            self.scrape_locale(slug, Locale::En),
            self.scrape_locale(slug, Locale::Fa),
            self.scrape_media(slug),
            self.scrape_metadata(slug),
        );

        // A locale that found sections but no whole-body capture can
        // still reconstruct the body from its blocks.
        backfill_body_from_sections(&mut en_locale);
        backfill_body_from_sections(&mut fa_raw);

        let fa_locale = merge_locales(fa_raw, &en_locale);

        let data = ScrapedRich {
            slug: slug.to_string(),
            kind: self.config.kind,
            source_url_en: self
                .abs(&self.config.detail_url(slug, Locale::En))
                .unwrap_or_default(),
            source_url_fa: self
                .abs(&self.config.detail_url(slug, Locale::Fa))
                .unwrap_or_default(),
            locales: vec![en_locale, fa_locale],
            works: media.works,
            installations: media.installations,
            props,
        };

        ScrapeResult {
            data,
            logs: self.logs.drain(),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Reconstruct `bodyHtml`/`bodyText` from section blocks when the
/// whole-body capture came back empty but slicing succeeded.
fn backfill_body_from_sections(locale: &mut ScrapedLocale) {
    if !is_blank(&locale.body_html) {
        return;
    }
    let Some(sections) = &locale.sections else {
        return;
    };
    if sections.is_empty() {
        return;
    }

    locale.body_html = Some(
        sections
            .iter()
            .map(|s| {
                s.blocks
                    .iter()
                    .map(|b| b.html.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n"),
    );
    locale.body_text = Some(
        sections
            .iter()
            .map(|s| {
                s.blocks
                    .iter()
                    .map(|b| b.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n"),
    );
}

/// Apply the canonical-locale fallback to the alternate locale.
///
/// Fallback is per-field and triggers only on empty/absent values; a
/// populated alternate field is never overwritten.
fn merge_locales(mut fa: ScrapedLocale, en: &ScrapedLocale) -> ScrapedLocale {
    if is_blank(&fa.body_html) {
        fa.body_html = en.body_html.clone();
    }
    if is_blank(&fa.body_text) {
        fa.body_text = en.body_text.clone();
    }
    if fa.sections.as_ref().map_or(true, |s| s.is_empty()) {
        fa.sections = en.sections.clone();
    }
    if is_blank(&fa.cv_url) {
        fa.cv_url = en.cv_url.clone();
    }
    if is_blank(&fa.portfolio_url) {
        fa.portfolio_url = en.portfolio_url.clone();
    }
    fa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockType, ScrapedContentBlock, ScrapedSection};

    fn locale_with(body_html: Option<&str>, cv: Option<&str>) -> ScrapedLocale {
        ScrapedLocale {
            slug: "jane-doe".to_string(),
            locale: Locale::Fa,
            title: None,
            body_html: body_html.map(str::to_string),
            body_text: None,
            sections: None,
            cv_url: cv.map(str::to_string),
            portfolio_url: None,
        }
    }

    #[test]
    fn fallback_fills_missing_fields_from_canonical() {
        let mut en = locale_with(Some("<p>bio</p>"), Some("https://x/cv.pdf"));
        en.locale = Locale::En;

        let merged = merge_locales(locale_with(None, None), &en);
        assert_eq!(merged.body_html.as_deref(), Some("<p>bio</p>"));
        assert_eq!(merged.cv_url.as_deref(), Some("https://x/cv.pdf"));
        assert_eq!(merged.locale, Locale::Fa);
    }

    #[test]
    fn fallback_never_overwrites_populated_fields() {
        let mut en = locale_with(Some("<p>english</p>"), None);
        en.locale = Locale::En;

        let merged = merge_locales(locale_with(Some("<p>فارسی</p>"), None), &en);
        assert_eq!(merged.body_html.as_deref(), Some("<p>فارسی</p>"));
    }

    #[test]
    fn empty_string_counts_as_absent_for_fallback() {
        let mut en = locale_with(Some("<p>english</p>"), None);
        en.locale = Locale::En;

        let merged = merge_locales(locale_with(Some(""), None), &en);
        assert_eq!(merged.body_html.as_deref(), Some("<p>english</p>"));
    }

    #[test]
    fn body_backfills_from_sections() {
        let mut locale = locale_with(None, None);
        locale.sections = Some(vec![ScrapedSection {
            key: "BIO".to_string(),
            label: "Bio".to_string(),
            blocks: vec![
                ScrapedContentBlock {
                    block_type: BlockType::RichText,
                    html: "<p>one</p>".to_string(),
                    text: "one".to_string(),
                },
                ScrapedContentBlock {
                    block_type: BlockType::RichText,
                    html: "<p>two</p>".to_string(),
                    text: "two".to_string(),
                },
            ],
        }]);

        backfill_body_from_sections(&mut locale);
        assert_eq!(locale.body_html.as_deref(), Some("<p>one</p>\n<p>two</p>"));
        assert_eq!(locale.body_text.as_deref(), Some("one\ntwo"));
    }
}
