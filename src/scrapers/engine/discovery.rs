//! List discovery: index page to candidate detail-page slugs.

use std::collections::HashSet;

use scraper::{ElementRef, Html};

use crate::models::{ListResult, Locale, ScrapedListItem};

use super::dom;
use super::GalleryScraper;

impl GalleryScraper {
    /// Fetch the configured list page and extract detail-page links.
    ///
    /// Best-effort: fetch or parse trouble degrades to an empty item
    /// list with a logged error, so callers can still retry individual
    /// slugs.
    pub async fn fetch_list(&self) -> ListResult {
        self.logs.reset();
        let url = self.config.list_url();
        self.logs.info(format!("[LIST] Fetching {}", url));

        let items = match self.fetcher.fetch(&url).await {
            Ok(html) => self.extract_list_items(&html),
            Err(e) => {
                self.logs.error(
                    "[LIST] Failed to fetch list page",
                    Some(serde_json::json!(e.to_string())),
                );
                Vec::new()
            }
        };

        ListResult {
            items,
            logs: self.logs.drain(),
        }
    }

    fn extract_list_items(&self, html: &str) -> Vec<ScrapedListItem> {
        let selectors = &self.config.selectors;

        let Some(item_selector) = dom::parse_selector(&selectors.list_items) else {
            self.logs.warn(
                format!("[LIST] Invalid list-item selector {:?}", selectors.list_items),
                None,
            );
            return Vec::new();
        };
        let Some(expected_segment) = self.config.list_segment() else {
            self.logs.warn(
                format!("[LIST] List path {:?} has no second segment", self.config.paths.list),
                None,
            );
            return Vec::new();
        };

        let document = Html::parse_document(html);
        let candidates: Vec<_> = document.select(&item_selector).collect();
        self.logs.info(format!(
            "[LIST] Selector {:?} found {} elements",
            selectors.list_items,
            candidates.len()
        ));

        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for el in candidates {
            let href = el.value().attr("href").unwrap_or("").trim();
            let text = self.list_item_name(el);
            if href.is_empty() || text.is_empty() {
                continue;
            }

            let Ok(resolved) = self.base.join(href) else {
                self.logs
                    .warn(format!("[LIST] Invalid URL found: {}", href), None);
                continue;
            };

            // Only /en/<kind>/<slug> shapes are detail pages; everything
            // else sharing the selector (navigation, anchors) is noise.
            let parts: Vec<&str> = resolved
                .path()
                .split('/')
                .filter(|s| !s.is_empty())
                .collect();
            if parts.len() != 3
                || parts[0] != Locale::En.path_code()
                || parts[1].to_lowercase() != expected_segment
            {
                continue;
            }

            let slug = parts[2];
            if !seen.insert(slug.to_string()) {
                self.logs
                    .info(format!("[LIST] Skipped duplicate slug: {}", slug));
                continue;
            }

            items.push(ScrapedListItem {
                slug: slug.to_string(),
                name_en: dom::collapse_ws(&text),
                source_url_en: self
                    .abs(&self.config.detail_url(slug, Locale::En))
                    .unwrap_or_default(),
                source_url_fa: self
                    .abs(&self.config.detail_url(slug, Locale::Fa))
                    .unwrap_or_default(),
            });
        }

        self.logs
            .info(format!("[LIST] Found {} final items", items.len()));
        items
    }

    /// Display text for a list item. A configured `list_name` selector
    /// overrides the anchor's own text; a leading `+` searches the
    /// anchor's following siblings (image cards keep their caption in a
    /// sibling element).
    fn list_item_name(&self, el: ElementRef<'_>) -> String {
        let Some(name_selector) = &self.config.selectors.list_name else {
            return dom::element_text(el);
        };

        if let Some(sibling_part) = name_selector.strip_prefix('+') {
            if let Some(selector) = dom::parse_selector(sibling_part.trim()) {
                if let Some(found) =
                    dom::next_sibling_elements(el).find(|sib| selector.matches(sib))
                {
                    return dom::element_text(found);
                }
            }
            return String::new();
        }

        match dom::parse_selector(name_selector) {
            Some(selector) => el
                .select(&selector)
                .next()
                .map(dom::element_text)
                .unwrap_or_default(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::config::builtin;
    use crate::scrapers::http::{FetchError, Fetcher};
    use crate::scrapers::GalleryScraper;

    struct FixtureFetcher(String);

    #[async_trait]
    impl Fetcher for FixtureFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            Err(FetchError::InvalidUrl(url.to_string()))
        }
    }

    fn scraper_with(html: &str) -> GalleryScraper {
        GalleryScraper::new(
            builtin::artist_config(),
            Arc::new(FixtureFetcher(html.to_string())),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn duplicate_slugs_collapse_to_first_occurrence() {
        let html = r#"
            <body>
              <a href="/en/artists/jane-doe">Jane Doe</a>
              <a href="/en/artists/jane-doe">Jane Doe (again)</a>
              <a href="/en/artists/john-roe">John Roe</a>
            </body>
        "#;
        let result = scraper_with(html).fetch_list().await;

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].slug, "jane-doe");
        assert_eq!(result.items[0].name_en, "Jane Doe");
        assert_eq!(result.items[1].slug, "john-roe");
    }

    #[tokio::test]
    async fn navigation_and_foreign_links_are_rejected() {
        let html = r#"
            <body>
              <a href="/en/artists">All artists</a>
              <a href="/en/exhibitions/some-show">A show</a>
              <a href="/fa/artists/jane-doe">جین</a>
              <a href="https://instagram.com/ogallery">Instagram</a>
              <a href="/en/artists/jane-doe">Jane Doe</a>
            </body>
        "#;
        let result = scraper_with(html).fetch_list().await;

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].slug, "jane-doe");
    }

    #[tokio::test]
    async fn detail_urls_are_attached_per_locale() {
        let html = r#"<a href="/en/artists/jane-doe">Jane Doe</a>"#;
        let result = scraper_with(html).fetch_list().await;

        let item = &result.items[0];
        assert_eq!(item.source_url_en, "https://ogallery.net/en/artists/jane-doe");
        assert_eq!(item.source_url_fa, "https://ogallery.net/fa/artists/jane-doe");
    }

    #[tokio::test]
    async fn fetch_failure_returns_empty_list_with_error_log() {
        let scraper =
            GalleryScraper::new(builtin::artist_config(), Arc::new(FailingFetcher)).unwrap();
        let result = scraper.fetch_list().await;

        assert!(result.items.is_empty());
        assert!(result
            .logs
            .iter()
            .any(|log| log.level == crate::models::LogLevel::Error));
    }

    #[tokio::test]
    async fn sibling_list_name_selector_reads_caption() {
        let mut config = builtin::artist_config();
        config.selectors.list_items = "a.card-thumb".to_string();
        config.selectors.list_name = Some("+ p".to_string());

        let html = r#"
            <div>
              <a class="card-thumb" href="/en/artists/jane-doe"><img src="/t.jpg"></a>
              <p>Jane  Doe</p>
            </div>
        "#;
        let scraper =
            GalleryScraper::new(config, Arc::new(FixtureFetcher(html.to_string()))).unwrap();
        let result = scraper.fetch_list().await;

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name_en, "Jane Doe");
    }
}
