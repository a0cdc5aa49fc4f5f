//! Built-in scraper definitions for the gallery site.
//!
//! These mirror the live site's markup as of the last selector tuning
//! pass. A config file can replace any of them without a rebuild; see
//! [`crate::config::Config`].

use std::collections::HashMap;

use crate::models::ScrapeKind;

use super::scraper::{
    BodyConfig, CvLinkConfig, ImageConfig, InstallationsConfig, KeywordSet, PathConfig,
    PortfolioLinkConfig, ScraperConfig, SelectorConfig, WorksConfig,
};

const BASE: &str = "https://ogallery.net";

/// Artist pages: bio body anchored at `#bio`, CV/portfolio PDFs, work
/// and installation galleries.
pub fn artist_config() -> ScraperConfig {
    ScraperConfig {
        kind: ScrapeKind::Artist,
        base_url: BASE.to_string(),
        paths: PathConfig {
            list: "/en/artists".to_string(),
            detail: format!("{BASE}/{{locale}}/artists/{{slug}}"),
        },
        selectors: SelectorConfig {
            list_items: "a[href]".to_string(),
            list_name: None,
            title: ".header-page h1, h1".to_string(),
            artist_link: None,
            date_string: None,
            publish_date: None,
            custom_props: HashMap::new(),
            image: None,
            body: BodyConfig {
                preferred_anchor: Some("#bio".to_string()),
                container: ".row".to_string(),
                heading_tags: vec!["h2".to_string()],
                keywords: KeywordSet {
                    en: vec!["Bio".to_string()],
                    fa: vec!["زندگی‌نامه".to_string(), "زندگینامه".to_string()],
                },
                content_wrapper: ".col-12".to_string(),
                paragraph_selector: "p".to_string(),
                section_key: "BIO".to_string(),
            },
            cv_link: Some(CvLinkConfig {
                row_selector: ".col-6".to_string(),
                keywords: vec!["cv".to_string(), "resume".to_string()],
            }),
            portfolio_link: Some(PortfolioLinkConfig {
                keywords: vec!["portfolio".to_string()],
            }),
            works: Some(WorksConfig {
                container: "a[rel=\"works\"]".to_string(),
                caption_attr: "data-caption".to_string(),
            }),
            installations: Some(InstallationsConfig {
                selector: "#installation-SlideShow img".to_string(),
            }),
        },
    }
}

/// Exhibition pages: press-release body, exhibiting-artist link and
/// date range in the page header.
pub fn exhibition_config() -> ScraperConfig {
    ScraperConfig {
        kind: ScrapeKind::Exhibition,
        base_url: BASE.to_string(),
        paths: PathConfig {
            list: "/en/exhibitions/2021".to_string(),
            detail: format!("{BASE}/{{locale}}/exhibitions/{{slug}}"),
        },
        selectors: SelectorConfig {
            list_items: ".row a[href]".to_string(),
            list_name: None,
            title: "h1".to_string(),
            artist_link: Some("h2 a[href]".to_string()),
            date_string: Some("h5".to_string()),
            publish_date: None,
            custom_props: HashMap::new(),
            image: None,
            body: BodyConfig {
                preferred_anchor: None,
                container: ".row".to_string(),
                heading_tags: vec!["h4".to_string(), "h2".to_string()],
                keywords: KeywordSet {
                    en: vec![
                        "Press Release".to_string(),
                        "Statement".to_string(),
                        "Text".to_string(),
                    ],
                    fa: vec![
                        "گزاره".to_string(),
                        "بیانیه".to_string(),
                        "متن".to_string(),
                    ],
                },
                content_wrapper: ".col-12".to_string(),
                paragraph_selector: "p".to_string(),
                section_key: "PRESS_RELEASE".to_string(),
            },
            cv_link: None,
            portfolio_link: None,
            works: Some(WorksConfig {
                container: "a[rel=\"works\"]".to_string(),
                caption_attr: "data-caption".to_string(),
            }),
            installations: None,
        },
    }
}

/// News pages: the whole article column is the body (any `h1`
/// qualifies), publish date and featured image as metadata.
pub fn news_config() -> ScraperConfig {
    ScraperConfig {
        kind: ScrapeKind::NewsItem,
        base_url: BASE.to_string(),
        paths: PathConfig {
            list: "/en/news".to_string(),
            detail: format!("{BASE}/{{locale}}/news/{{slug}}"),
        },
        selectors: SelectorConfig {
            list_items: ".row a[href]".to_string(),
            list_name: None,
            title: "h1".to_string(),
            artist_link: None,
            date_string: None,
            publish_date: Some("h5".to_string()),
            custom_props: HashMap::new(),
            image: Some(ImageConfig {
                selector: ".col-md-2 img".to_string(),
                attr: "src".to_string(),
                alt: "alt".to_string(),
            }),
            body: BodyConfig {
                preferred_anchor: None,
                container: ".row".to_string(),
                heading_tags: vec!["h1".to_string()],
                // "." matches any heading text
                keywords: KeywordSet {
                    en: vec![".".to_string()],
                    fa: vec![".".to_string()],
                },
                content_wrapper: ".col-md-10 > div".to_string(),
                paragraph_selector: "p".to_string(),
                section_key: "ARTICLE".to_string(),
            },
            cv_link: None,
            portfolio_link: None,
            works: Some(WorksConfig {
                container: "a[rel=\"works\"]".to_string(),
                caption_attr: "data-caption".to_string(),
            }),
            installations: None,
        },
    }
}

/// All built-in configs keyed by the kind parameter callers pass on the
/// command line.
pub fn builtin_configs() -> HashMap<String, ScraperConfig> {
    HashMap::from([
        ("artists".to_string(), artist_config()),
        ("exhibitions".to_string(), exhibition_config()),
        ("news".to_string(), news_config()),
    ])
}
