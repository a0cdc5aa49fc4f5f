//! Record types produced by the scraping engine.
//!
//! Everything in this module is created fresh per scrape invocation and
//! handed off whole to the caller; nothing is retained across calls. The
//! serialized shape (camelCase keys) is the contract consumed by the
//! downstream import pipeline.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Site language. The canonical locale is English; Persian content is
/// merged against it with per-field fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Locale {
    En,
    Fa,
}

impl Locale {
    /// Uppercase tag used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "EN",
            Locale::Fa => "FA",
        }
    }

    /// Lowercase code used in URL paths (`/en/artists/...`).
    pub fn path_code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fa => "fa",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content kind a scraper configuration targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrapeKind {
    #[serde(rename = "ARTIST")]
    Artist,
    #[serde(rename = "EXHIBITION")]
    Exhibition,
    #[serde(rename = "NEWS-ITEM")]
    NewsItem,
}

impl ScrapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapeKind::Artist => "ARTIST",
            ScrapeKind::Exhibition => "EXHIBITION",
            ScrapeKind::NewsItem => "NEWS-ITEM",
        }
    }
}

impl fmt::Display for ScrapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a scrape diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// One diagnostic entry accumulated during a scrape.
///
/// Failure information travels out-of-band through these instead of
/// errors, so batch callers can process hundreds of slugs without
/// per-slug error plumbing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeLog {
    pub level: LogLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

/// One row discovered on an index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedListItem {
    pub slug: String,
    /// Display text taken from the anchor on the English list page.
    pub name_en: String,
    pub source_url_en: String,
    pub source_url_fa: String,
}

/// Paragraph-level classification inside a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    RichText,
    Info,
}

/// One paragraph-level fragment of a section body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedContentBlock {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub html: String,
    pub text: String,
}

/// A semantically identified slice of the body, split at heading
/// boundaries. `key` is fixed per configuration ("BIO",
/// "PRESS_RELEASE", ...); `label` is the literal heading text found on
/// the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedSection {
    pub key: String,
    pub label: String,
    pub blocks: Vec<ScrapedContentBlock>,
}

/// One language's view of one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedLocale {
    pub slug: String,
    pub locale: Locale,
    pub title: Option<String>,
    pub body_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<ScrapedSection>>,
    pub cv_url: Option<String>,
    pub portfolio_url: Option<String>,
}

impl ScrapedLocale {
    /// A record with every field absent, used when a locale page cannot
    /// be fetched or resolved at all.
    pub fn empty(slug: &str, locale: Locale) -> Self {
        Self {
            slug: slug.to_string(),
            locale,
            title: None,
            body_html: None,
            body_text: None,
            sections: None,
            cv_url: None,
            portfolio_url: None,
        }
    }
}

/// One gallery image. Uniqueness is by `full` URL; an image appearing
/// in both locale galleries merges into one record with both captions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedWork {
    pub full: String,
    pub thumb: Option<String>,
    pub caption_en: Option<String>,
    pub caption_fa: Option<String>,
}

/// One installation-view image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedInstallation {
    pub full: String,
}

/// The final orchestrated output for one slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedRich {
    pub slug: String,
    pub kind: ScrapeKind,
    pub source_url_en: String,
    pub source_url_fa: String,
    /// Exactly one entry per locale, canonical locale first.
    pub locales: Vec<ScrapedLocale>,
    pub works: Vec<ScrapedWork>,
    pub installations: Vec<ScrapedInstallation>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub props: HashMap<String, serde_json::Value>,
}

/// List discovery output plus accumulated diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult {
    pub items: Vec<ScrapedListItem>,
    pub logs: Vec<ScrapeLog>,
}

/// Rich scrape output plus accumulated diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub data: ScrapedRich,
    pub logs: Vec<ScrapeLog>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Locale::Fa).unwrap(), "\"FA\"");
        assert_eq!(Locale::En.path_code(), "en");
    }

    #[test]
    fn scraped_work_uses_camel_case_keys() {
        let work = ScrapedWork {
            full: "https://x/img1.jpg".to_string(),
            thumb: None,
            caption_en: Some("Untitled".to_string()),
            caption_fa: None,
        };
        let json = serde_json::to_value(&work).unwrap();
        assert!(json.get("captionEn").is_some());
        assert!(json.get("captionFa").is_some());
    }

    #[test]
    fn block_type_uses_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&BlockType::RichText).unwrap(),
            "\"RICH_TEXT\""
        );
    }
}
