//! Non-locale-specific metadata off the canonical detail page:
//! related-entity link, date range, publish date, featured image, and
//! configured custom props.

use std::collections::HashMap;

use regex::Regex;
use scraper::Html;
use serde_json::{json, Value};

use crate::config::scraper::PropSelector;
use crate::models::Locale;

use super::{dates, dom, GalleryScraper};

impl GalleryScraper {
    /// Scrape metadata props. Never fails: fetch or parse trouble
    /// degrades to a partial or empty map, logged. Kinds with no
    /// metadata selectors short-circuit without fetching.
    pub(crate) async fn scrape_metadata(&self, slug: &str) -> HashMap<String, Value> {
        if !self.config.selectors.has_metadata() {
            return HashMap::new();
        }
        let Some(url) = self.abs(&self.config.detail_url(slug, Locale::En)) else {
            return HashMap::new();
        };

        self.logs
            .info(format!("[META] Fetching metadata from {}", url));

        match self.fetcher.fetch(&url).await {
            Ok(html) => self.extract_metadata(&html),
            Err(e) => {
                self.logs.error(
                    "[META] Failed to scrape metadata",
                    Some(json!(e.to_string())),
                );
                HashMap::new()
            }
        }
    }

    fn extract_metadata(&self, html: &str) -> HashMap<String, Value> {
        let document = Html::parse_document(html);
        let selectors = &self.config.selectors;
        let mut props = HashMap::new();

        for (key, prop) in &selectors.custom_props {
            if let Some(value) = self.extract_custom_prop(&document, prop) {
                props.insert(key.clone(), json!(value));
            }
        }

        if let Some(publish_selector) = &selectors.publish_date {
            let publish_date = dom::parse_selector(publish_selector).and_then(|sel| {
                document
                    .select(&sel)
                    .map(|el| dom::element_text(el))
                    .find(|t| !t.is_empty())
            });
            if let Some(publish_date) = publish_date {
                props.insert("publishDate".to_string(), json!(publish_date));
            }
        }

        if let Some(image) = &selectors.image {
            if let Some(featured) = self.extract_featured_image(&document, image) {
                props.insert("featuredImage".to_string(), featured);
            }
        }

        if let Some(artist_selector) = &selectors.artist_link {
            if let Some((related_slug, related_name)) =
                self.extract_related_entity(&document, artist_selector)
            {
                props.insert("relatedSlug".to_string(), json!(related_slug));
                props.insert("relatedName".to_string(), json!(related_name));
            }
        }

        if let Some(date_selector) = &selectors.date_string {
            let raw = dom::parse_selector(date_selector)
                .and_then(|sel| document.select(&sel).next())
                .map(dom::element_text_collapsed)
                .filter(|t| !t.is_empty());
            if let Some(raw) = raw {
                props.insert("dateString".to_string(), json!(raw));
                match dates::parse_date_range(&raw) {
                    Some((start, end)) => {
                        props.insert("startDate".to_string(), json!(dates::to_iso(start)));
                        props.insert("endDate".to_string(), json!(dates::to_iso(end)));
                    }
                    None => {
                        self.logs.warn(
                            "[META] Could not parse date range",
                            Some(json!({ "dateString": raw })),
                        );
                    }
                }
            }
        }

        props
    }

    fn extract_custom_prop(&self, document: &Html, prop: &PropSelector) -> Option<String> {
        match prop {
            PropSelector::Simple(selector) => dom::parse_selector(selector)
                .and_then(|sel| document.select(&sel).next())
                .map(dom::element_text_collapsed)
                .filter(|t| !t.is_empty()),
            PropSelector::Pattern { selector, pattern } => {
                let raw = dom::parse_selector(selector)
                    .and_then(|sel| document.select(&sel).next())
                    .map(dom::element_text)
                    .filter(|t| !t.is_empty())?;
                let Ok(re) = Regex::new(pattern) else {
                    self.logs
                        .warn(format!("[META] Invalid prop pattern {:?}", pattern), None);
                    return None;
                };
                let caps = re.captures(&raw)?;
                let matched = caps.get(1).or_else(|| caps.get(0))?;
                Some(matched.as_str().trim().to_string()).filter(|t| !t.is_empty())
            }
        }
    }

    /// Configured selector first; `og:image` meta as a fallback.
    fn extract_featured_image(
        &self,
        document: &Html,
        image: &crate::config::scraper::ImageConfig,
    ) -> Option<Value> {
        let element = dom::parse_selector(&image.selector)
            .and_then(|sel| document.select(&sel).next());

        let mut src = element
            .and_then(|el| {
                el.value()
                    .attr(&image.attr)
                    .or_else(|| el.value().attr("data-src"))
            })
            .and_then(|s| self.abs(s));
        let alt = element
            .and_then(|el| el.value().attr(&image.alt))
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        if src.is_none() {
            let og_selector = dom::parse_selector("meta[property=\"og:image\"]")?;
            src = document
                .select(&og_selector)
                .next()
                .and_then(|el| el.value().attr("content"))
                .and_then(|s| self.abs(s));
            if let Some(ref found) = src {
                self.logs
                    .info(format!("[META] Found image via og:image: {}", found));
            }
        }

        src.map(|url| json!({ "url": url, "alt": alt }))
    }

    /// Related-entity link: href's last path segment is the slug, the
    /// anchor text the display name; both must be non-empty.
    fn extract_related_entity(
        &self,
        document: &Html,
        artist_selector: &str,
    ) -> Option<(String, String)> {
        let anchor = dom::parse_selector(artist_selector)
            .and_then(|sel| document.select(&sel).next())?;

        let href = anchor.value().attr("href")?;
        let slug = dom::last_path_segment(&self.base, href)?;
        let name = dom::element_text_collapsed(anchor);
        if slug.is_empty() || name.is_empty() {
            return None;
        }
        Some((slug, name))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::config::builtin;
    use crate::config::scraper::{ImageConfig, PropSelector};
    use crate::models::LogLevel;
    use crate::scrapers::http::{FetchError, Fetcher};
    use crate::scrapers::GalleryScraper;

    struct FixtureFetcher(String);

    #[async_trait]
    impl Fetcher for FixtureFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct CountingFetcher(std::sync::atomic::AtomicUsize);

    #[async_trait]
    impl Fetcher for CountingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(String::new())
        }
    }

    fn exhibition_scraper(html: &str) -> GalleryScraper {
        GalleryScraper::new(
            builtin::exhibition_config(),
            Arc::new(FixtureFetcher(html.to_string())),
        )
        .unwrap()
    }

    const EXHIBITION_PAGE: &str = r#"
        <html><body>
          <h1>The End of Summer</h1>
          <h2><a href="/en/artists/jane-doe">Jane Doe</a></h2>
          <h5>December 5 - 19 2025</h5>
        </body></html>
    "#;

    #[tokio::test]
    async fn related_entity_and_dates_extract_from_canonical_page() {
        let props = exhibition_scraper(EXHIBITION_PAGE)
            .scrape_metadata("the-end-of-summer")
            .await;

        assert_eq!(props["relatedSlug"], "jane-doe");
        assert_eq!(props["relatedName"], "Jane Doe");
        assert_eq!(props["dateString"], "December 5 - 19 2025");
        assert_eq!(props["startDate"], "2025-12-05T00:00:00.000Z");
        assert_eq!(props["endDate"], "2025-12-19T00:00:00.000Z");
    }

    #[tokio::test]
    async fn unparseable_date_keeps_raw_string_and_warns() {
        let html = r#"<h5>Opening soon</h5>"#;
        let scraper = exhibition_scraper(html);
        let result = scraper.scrape_detail("x").await;

        assert_eq!(result.data.props["dateString"], "Opening soon");
        assert!(!result.data.props.contains_key("startDate"));
        assert!(!result.data.props.contains_key("endDate"));
        assert!(result
            .logs
            .iter()
            .any(|log| log.level == LogLevel::Warn
                && log.message.contains("date range")));
    }

    #[tokio::test]
    async fn kinds_without_metadata_selectors_skip_the_fetch() {
        let fetcher = Arc::new(CountingFetcher(std::sync::atomic::AtomicUsize::new(0)));
        let scraper = GalleryScraper::new(builtin::artist_config(), fetcher.clone()).unwrap();

        let props = scraper.scrape_metadata("jane-doe").await;
        assert!(props.is_empty());
        assert_eq!(fetcher.0.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn custom_prop_pattern_takes_first_capture_group() {
        let mut config = builtin::exhibition_config();
        config.selectors.custom_props = HashMap::from([(
            "artistName".to_string(),
            PropSelector::Pattern {
                selector: "h5.art-title".to_string(),
                pattern: "^([^,]+)".to_string(),
            },
        )]);

        let html = r#"<h5 class="art-title">Jane Doe, "The End Of Summer"</h5>"#;
        let scraper =
            GalleryScraper::new(config, Arc::new(FixtureFetcher(html.to_string()))).unwrap();
        let props = scraper.scrape_metadata("x").await;

        assert_eq!(props["artistName"], "Jane Doe");
    }

    #[tokio::test]
    async fn featured_image_falls_back_to_og_image() {
        let mut config = builtin::exhibition_config();
        config.selectors.image = Some(ImageConfig {
            selector: ".col-md-2 img".to_string(),
            attr: "src".to_string(),
            alt: "alt".to_string(),
        });

        let html = r#"
            <head><meta property="og:image" content="/images/share.jpg"></head>
            <body><h5>December 5 - 19 2025</h5></body>
        "#;
        let scraper =
            GalleryScraper::new(config, Arc::new(FixtureFetcher(html.to_string()))).unwrap();
        let props = scraper.scrape_metadata("x").await;

        assert_eq!(
            props["featuredImage"]["url"],
            "https://ogallery.net/images/share.jpg"
        );
    }
}
