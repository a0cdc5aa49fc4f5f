//! Locale content extraction: title, body, sections, document links.
//!
//! Body location is a priority-ordered strategy list: a preferred
//! anchor when the config names one, then a heading-keyword scan over
//! candidate containers. Every miss degrades the affected field and
//! logs what was attempted, so selector configs can be tuned without
//! re-reading page source.

use scraper::{ElementRef, Html};

use crate::config::scraper::{BodyConfig, CvLinkConfig, PortfolioLinkConfig};
use crate::models::{Locale, ScrapedLocale, ScrapedSection};

use super::{classify, dom, GalleryScraper};

impl GalleryScraper {
    /// Scrape one language's view of one entity. Never fails: fetch or
    /// extraction trouble returns a record with null fields plus logs.
    pub(crate) async fn scrape_locale(&self, slug: &str, locale: Locale) -> ScrapedLocale {
        let Some(url) = self.abs(&self.config.detail_url(slug, locale)) else {
            return ScrapedLocale::empty(slug, locale);
        };

        self.logs
            .info(format!("[{}] Fetching detail from {}", locale, url));

        match self.fetcher.fetch(&url).await {
            Ok(html) => self.extract_locale(slug, locale, &html),
            Err(e) => {
                self.logs.error(
                    format!("[{}] Failed to scrape detail page", locale),
                    Some(serde_json::json!(e.to_string())),
                );
                ScrapedLocale::empty(slug, locale)
            }
        }
    }

    fn extract_locale(&self, slug: &str, locale: Locale, html: &str) -> ScrapedLocale {
        let document = Html::parse_document(html);
        let selectors = &self.config.selectors;

        let title = dom::parse_selector(&selectors.title).and_then(|sel| {
            document
                .select(&sel)
                .map(|el| dom::element_text(el))
                .find(|t| !t.is_empty())
        });
        if title.is_none() {
            self.logs
                .warn(format!("[{}] Could not find title", locale), None);
        }

        let body = &selectors.body;
        let keywords = body.keywords.for_locale(locale);

        let Some(body_row) = self.find_body_container(&document, body, keywords, locale) else {
            self.logs.warn(
                format!("[{}] No body container found", locale),
                Some(serde_json::json!({ "keywords": keywords })),
            );
            return ScrapedLocale {
                slug: slug.to_string(),
                locale,
                title,
                body_html: None,
                body_text: None,
                sections: None,
                cv_url: None,
                portfolio_url: None,
            };
        };

        // Pages sometimes nest a translation-widget wrapper first; the
        // real content wrapper is the last match.
        let content = dom::parse_selector(&body.content_wrapper)
            .and_then(|sel| body_row.select(&sel).last());
        let body_html = content
            .map(|el| el.inner_html().trim().to_string())
            .filter(|s| !s.is_empty());
        let body_text = content
            .map(dom::element_text_collapsed)
            .filter(|s| !s.is_empty());

        let sections = self.slice_sections(body_row, body, keywords);

        let cv_url = selectors
            .cv_link
            .as_ref()
            .and_then(|cv| self.find_cv_link(body_row, cv));
        let portfolio_url = selectors
            .portfolio_link
            .as_ref()
            .and_then(|portfolio| self.find_portfolio_link(&document, portfolio));

        ScrapedLocale {
            slug: slug.to_string(),
            locale,
            title,
            body_html,
            body_text,
            sections,
            cv_url,
            portfolio_url,
        }
    }

    /// Strategy A: preferred anchor, then the next sibling container
    /// holding a heading. Strategy B: first candidate container whose
    /// heading text matches a locale keyword, tested raw and with
    /// invisible joiners stripped.
    fn find_body_container<'a>(
        &self,
        document: &'a Html,
        body: &BodyConfig,
        keywords: &[String],
        locale: Locale,
    ) -> Option<ElementRef<'a>> {
        let container_selector = dom::parse_selector(&body.container)?;
        let heading_selector = dom::heading_selector(&body.heading_tags)?;

        if let Some(anchor) = body
            .preferred_anchor
            .as_deref()
            .and_then(dom::parse_selector)
            .and_then(|sel| document.select(&sel).next())
        {
            let found = dom::next_sibling_elements(anchor).find(|el| {
                container_selector.matches(el) && el.select(&heading_selector).next().is_some()
            });
            if let Some(row) = found {
                self.logs
                    .info(format!("[{}] Found body container via preferred anchor", locale));
                return Some(row);
            }
        }

        for candidate in document.select(&container_selector) {
            for heading in candidate.select(&heading_selector) {
                let raw = dom::element_text_collapsed(heading);
                let normalized = dom::strip_joiners(&raw);
                let hit = keywords.iter().any(|k| {
                    dom::keyword_matches(k, &raw) || dom::keyword_matches(k, &normalized)
                });
                if hit {
                    self.logs
                        .info(format!("[{}] Found section header: {:?}", locale, raw));
                    return Some(candidate);
                }
            }
        }

        None
    }

    /// Walk each keyword-matched heading forward through its siblings,
    /// collecting HTML until the next heading, and classify the
    /// resulting paragraphs.
    fn slice_sections(
        &self,
        body_row: ElementRef<'_>,
        body: &BodyConfig,
        keywords: &[String],
    ) -> Option<Vec<ScrapedSection>> {
        let heading_selector = dom::heading_selector(&body.heading_tags)?;
        let paragraph_selector = dom::parse_selector(&body.paragraph_selector)?;

        let mut sections = Vec::new();
        for heading in body_row.select(&heading_selector) {
            let label = dom::element_text(heading);
            if !keywords.iter().any(|k| dom::keyword_matches(k, &label)) {
                continue;
            }

            let mut fragments = Vec::new();
            for sibling in dom::next_sibling_elements(heading) {
                if heading_selector.matches(&sibling) {
                    break;
                }
                fragments.push(sibling.html());
            }

            let section_html = fragments.concat().trim().to_string();
            if section_html.is_empty() {
                continue;
            }

            sections.push(ScrapedSection {
                key: body.section_key.clone(),
                label,
                blocks: classify::split_blocks(&section_html, &paragraph_selector),
            });
        }

        if sections.is_empty() {
            None
        } else {
            Some(sections)
        }
    }

    /// First PDF anchor in the CV row whose href contains a configured
    /// keyword; any PDF anchor in that row as a fallback.
    fn find_cv_link(&self, body_row: ElementRef<'_>, cv: &CvLinkConfig) -> Option<String> {
        let row_selector = dom::parse_selector(&cv.row_selector)?;
        let pdf_selector = dom::parse_selector("a[href$=\".pdf\"]")?;

        let container = body_row.select(&row_selector).next()?;
        let anchors: Vec<_> = container.select(&pdf_selector).collect();

        let preferred = anchors.iter().find(|a| {
            let href = a.value().attr("href").unwrap_or("").to_lowercase();
            cv.keywords.iter().any(|k| href.contains(&k.to_lowercase()))
        });

        preferred
            .or(anchors.first())
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| self.abs(href))
    }

    /// Page-wide search for a portfolio PDF.
    fn find_portfolio_link(
        &self,
        document: &Html,
        portfolio: &PortfolioLinkConfig,
    ) -> Option<String> {
        let pdf_selector = dom::parse_selector("a[href$=\".pdf\"]")?;

        document
            .select(&pdf_selector)
            .find(|a| {
                let href = a.value().attr("href").unwrap_or("").to_lowercase();
                portfolio
                    .keywords
                    .iter()
                    .any(|k| href.contains(&k.to_lowercase()))
            })
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| self.abs(href))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::config::builtin;
    use crate::models::{BlockType, Locale};
    use crate::scrapers::http::{FetchError, Fetcher};
    use crate::scrapers::GalleryScraper;

    struct FixtureFetcher(String);

    #[async_trait]
    impl Fetcher for FixtureFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn artist_scraper(html: &str) -> GalleryScraper {
        GalleryScraper::new(
            builtin::artist_config(),
            Arc::new(FixtureFetcher(html.to_string())),
        )
        .unwrap()
    }

    const ARTIST_PAGE: &str = r#"
        <html><body>
          <div class="header-page"><h1>Jane Doe</h1></div>
          <div id="bio"></div>
          <div class="row">
            <div class="col-12">
              <h2>Bio</h2>
              <p>Jane Doe paints large canvases.</p>
              <p>Saturday to Wednesday, 12PM-8PM</p>
              <h2>Works</h2>
              <p>Selected works below.</p>
            </div>
            <div class="col-6">
              <a href="/files/jane-doe-cv.pdf">CV</a>
              <a href="/files/unrelated.pdf">Catalogue</a>
            </div>
          </div>
          <a href="/files/jane-doe-portfolio.pdf">Portfolio</a>
        </body></html>
    "#;

    #[tokio::test]
    async fn title_and_body_extract_from_preferred_anchor() {
        let result = artist_scraper(ARTIST_PAGE)
            .scrape_locale("jane-doe", Locale::En)
            .await;

        assert_eq!(result.title.as_deref(), Some("Jane Doe"));
        let body_html = result.body_html.unwrap();
        assert!(body_html.contains("Jane Doe paints large canvases."));
        assert!(result.body_text.unwrap().contains("Selected works below."));
    }

    #[tokio::test]
    async fn sections_slice_at_heading_boundaries() {
        let result = artist_scraper(ARTIST_PAGE)
            .scrape_locale("jane-doe", Locale::En)
            .await;

        let sections = result.sections.unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].key, "BIO");
        assert_eq!(sections[0].label, "Bio");

        let blocks = &sections[0].blocks;
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].block_type, BlockType::RichText);
        assert_eq!(blocks[1].block_type, BlockType::Info);
        // The section stops before the next heading
        assert!(!blocks.iter().any(|b| b.text.contains("Selected works")));
    }

    #[tokio::test]
    async fn cv_prefers_keyword_match_and_portfolio_searches_page_wide() {
        let result = artist_scraper(ARTIST_PAGE)
            .scrape_locale("jane-doe", Locale::En)
            .await;

        assert_eq!(
            result.cv_url.as_deref(),
            Some("https://ogallery.net/files/jane-doe-cv.pdf")
        );
        assert_eq!(
            result.portfolio_url.as_deref(),
            Some("https://ogallery.net/files/jane-doe-portfolio.pdf")
        );
    }

    #[tokio::test]
    async fn cv_falls_back_to_any_pdf_in_row() {
        let html = r#"
            <div id="bio"></div>
            <div class="row">
              <div class="col-12"><h2>Bio</h2><p>text</p></div>
              <div class="col-6"><a href="/files/something-else.pdf">Download</a></div>
            </div>
        "#;
        let result = artist_scraper(html).scrape_locale("jane-doe", Locale::En).await;

        assert_eq!(
            result.cv_url.as_deref(),
            Some("https://ogallery.net/files/something-else.pdf")
        );
    }

    #[tokio::test]
    async fn keyword_scan_matches_joiner_split_persian_heading() {
        let html = "
            <div class=\"row\">
              <div class=\"col-12\">
                <h2>زندگی\u{200c}نامه</h2>
                <p>متن فارسی</p>
              </div>
            </div>
        ";
        let result = artist_scraper(html).scrape_locale("jane-doe", Locale::Fa).await;

        assert!(result.body_html.is_some());
        let sections = result.sections.unwrap();
        assert_eq!(sections[0].label, "زندگی\u{200c}نامه");
    }

    #[tokio::test]
    async fn missing_body_keeps_title_and_logs_keywords() {
        let html = r#"
            <h1>Jane Doe</h1>
            <div class="row"><div class="col-12"><h2>Unrelated</h2></div></div>
        "#;
        let scraper = artist_scraper(html);
        let result = scraper.scrape_locale("jane-doe", Locale::En).await;

        assert_eq!(result.title.as_deref(), Some("Jane Doe"));
        assert!(result.body_html.is_none());
        assert!(result.sections.is_none());
    }
}
