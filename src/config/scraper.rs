//! Declarative scraper configuration.
//!
//! One [`ScraperConfig`] per content kind describes where the list and
//! detail pages live and which selectors/heuristics locate each feature
//! on them. Configs are immutable once constructed; built-in definitions
//! live in [`crate::config::builtin`] and user config files may replace
//! them wholesale.

use serde::{Deserialize, Serialize};

use crate::models::{Locale, ScrapeKind};

/// URL layout for one content kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Path of the index page, relative to the base URL (`/en/artists`).
    pub list: String,
    /// Detail-page URL template. `{locale}` expands to the lowercase
    /// locale code and `{slug}` to the entity slug.
    pub detail: String,
}

/// Keyword lists used to recognize body headings, one per locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSet {
    pub en: Vec<String>,
    pub fa: Vec<String>,
}

impl KeywordSet {
    pub fn for_locale(&self, locale: Locale) -> &[String] {
        match locale {
            Locale::En => &self.en,
            Locale::Fa => &self.fa,
        }
    }
}

/// How to locate and slice the main body content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Preferred anchor element (`#bio`). When present on the page, the
    /// body is the next sibling container holding a heading. `None`
    /// skips straight to the keyword scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_anchor: Option<String>,
    /// Candidate container selector scanned by the keyword strategy.
    #[serde(default = "default_container")]
    pub container: String,
    /// Heading tags that delimit sections (`h2`, `h4`, ...).
    pub heading_tags: Vec<String>,
    /// Selector for the content wrapper inside the located container.
    /// The *last* match wins (translation widgets nest a decoy first).
    pub content_wrapper: String,
    /// Paragraph-level selector used when classifying section blocks.
    #[serde(default = "default_paragraph")]
    pub paragraph_selector: String,
    /// Section key emitted for every matched heading ("BIO",
    /// "PRESS_RELEASE", ...).
    pub section_key: String,
    /// Per-locale heading keywords. Patterns are tried as
    /// case-insensitive regexes against the raw heading text and a
    /// zero-width-joiner-stripped copy.
    pub keywords: KeywordSet,
}

fn default_container() -> String {
    ".row".to_string()
}

fn default_paragraph() -> String {
    "p".to_string()
}

/// Selector for a named custom prop, optionally post-processed by a
/// regex (first capture group wins, whole match otherwise).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropSelector {
    Simple(String),
    Pattern { selector: String, pattern: String },
}

/// Featured-image selector plus the attributes carrying URL and alt
/// text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    pub selector: String,
    #[serde(default = "default_src_attr")]
    pub attr: String,
    #[serde(default = "default_alt_attr")]
    pub alt: String,
}

fn default_src_attr() -> String {
    "src".to_string()
}

fn default_alt_attr() -> String {
    "alt".to_string()
}

/// CV/document link discovery: a row container plus href keywords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvLinkConfig {
    pub row_selector: String,
    pub keywords: Vec<String>,
}

/// Portfolio link discovery (page-wide PDF anchor search).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioLinkConfig {
    pub keywords: Vec<String>,
}

/// Work-gallery extraction: container elements plus the attribute
/// carrying the caption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksConfig {
    pub container: String,
    pub caption_attr: String,
}

/// Installation-view gallery selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallationsConfig {
    pub selector: String,
}

/// The per-feature selector bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Anchor elements on the list page.
    pub list_items: String,
    /// Optional selector for the list item's display text when the
    /// anchor itself has none. A leading `+` searches following
    /// siblings instead of descendants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_name: Option<String>,
    pub title: String,
    /// Link to a related entity (the exhibiting artist) on the
    /// canonical detail page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_link: Option<String>,
    /// Element carrying the free-text date range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_string: Option<String>,
    /// Element carrying a publish date, recorded verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    /// Named extra props scraped off the canonical page.
    #[serde(default, skip_serializing_if = "std::collections::HashMap::is_empty")]
    pub custom_props: std::collections::HashMap<String, PropSelector>,
    /// Featured image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageConfig>,
    pub body: BodyConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_link: Option<CvLinkConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_link: Option<PortfolioLinkConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub works: Option<WorksConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installations: Option<InstallationsConfig>,
}

impl SelectorConfig {
    /// Whether any metadata selector is configured. When none are, the
    /// metadata pass short-circuits without fetching.
    pub fn has_metadata(&self) -> bool {
        self.artist_link.is_some()
            || self.date_string.is_some()
            || self.publish_date.is_some()
            || self.image.is_some()
            || !self.custom_props.is_empty()
    }
}

/// Immutable description of how to scrape one content kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    pub kind: ScrapeKind,
    pub base_url: String,
    pub paths: PathConfig,
    pub selectors: SelectorConfig,
}

impl ScraperConfig {
    /// Resolve the detail-page URL template for a slug and locale.
    pub fn detail_url(&self, slug: &str, locale: Locale) -> String {
        self.paths
            .detail
            .replace("{locale}", locale.path_code())
            .replace("{slug}", slug)
    }

    /// Absolute URL of the list page.
    pub fn list_url(&self) -> String {
        format!("{}{}", self.base_url, self.paths.list)
    }

    /// The second path segment of the list page, used to validate
    /// discovered detail links (`/en/artists` -> `artists`).
    pub fn list_segment(&self) -> Option<String> {
        self.paths
            .list
            .split('/')
            .filter(|s| !s.is_empty())
            .nth(1)
            .map(|s| s.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builtin;

    #[test]
    fn detail_url_expands_template() {
        let config = builtin::artist_config();
        assert_eq!(
            config.detail_url("jane-doe", Locale::Fa),
            "https://ogallery.net/fa/artists/jane-doe"
        );
    }

    #[test]
    fn list_segment_skips_locale_prefix() {
        let config = builtin::exhibition_config();
        assert_eq!(config.list_segment().as_deref(), Some("exhibitions"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = builtin::artist_config();
        let text = toml::to_string(&config).unwrap();
        let parsed: ScraperConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.kind, ScrapeKind::Artist);
        assert_eq!(parsed.selectors.body.section_key, "BIO");
    }

    #[test]
    fn prop_selector_accepts_both_forms() {
        let simple: PropSelector = serde_json::from_str("\"h3 a\"").unwrap();
        assert!(matches!(simple, PropSelector::Simple(_)));

        let pattern: PropSelector =
            serde_json::from_str(r#"{"selector": "h5", "pattern": "^([^,]+)"}"#).unwrap();
        assert!(matches!(pattern, PropSelector::Pattern { .. }));
    }
}
