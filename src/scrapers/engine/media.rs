//! Work-gallery and installation-view extraction.
//!
//! Work galleries exist per locale; entries are merged by full-size
//! image URL so a shared image ends up as one record carrying both
//! captions. Installation views come from the canonical page only.

use std::collections::HashMap;

use scraper::Html;

use crate::config::scraper::WorksConfig;
use crate::models::{Locale, ScrapedInstallation, ScrapedWork};

use super::{dom, GalleryScraper};

/// Output of the media pass.
pub(crate) struct ScrapedMedia {
    pub works: Vec<ScrapedWork>,
    pub installations: Vec<ScrapedInstallation>,
}

/// One locale's view of a gallery entry, before the caption merge.
#[derive(Debug, Clone)]
struct LocaleWork {
    full: String,
    thumb: Option<String>,
    caption: Option<String>,
}

impl GalleryScraper {
    pub(crate) async fn scrape_media(&self, slug: &str) -> ScrapedMedia {
        let (en_works, fa_works) = futures::future::join(
            self.scrape_works_for_locale(slug, Locale::En),
            self.scrape_works_for_locale(slug, Locale::Fa),
        )
        .await;

        let works = merge_works(en_works, fa_works);
        self.logs.info(format!("Merged {} works", works.len()));

        let installations = self.scrape_installations(slug).await;

        ScrapedMedia {
            works,
            installations,
        }
    }

    async fn scrape_works_for_locale(&self, slug: &str, locale: Locale) -> Vec<LocaleWork> {
        let Some(works_config) = self.config.selectors.works.clone() else {
            return Vec::new();
        };
        let Some(url) = self.abs(&self.config.detail_url(slug, locale)) else {
            return Vec::new();
        };

        match self.fetcher.fetch(&url).await {
            Ok(html) => self.extract_works(&html, &works_config),
            Err(e) => {
                self.logs.error(
                    format!("[{}] Failed to fetch work gallery", locale),
                    Some(serde_json::json!(e.to_string())),
                );
                Vec::new()
            }
        }
    }

    fn extract_works(&self, html: &str, works_config: &WorksConfig) -> Vec<LocaleWork> {
        let Some(container_selector) = dom::parse_selector(&works_config.container) else {
            self.logs.warn(
                format!("Invalid works selector {:?}", works_config.container),
                None,
            );
            return Vec::new();
        };
        let Some(img_selector) = dom::parse_selector("img") else {
            return Vec::new();
        };
        let caption_selector = dom::parse_selector(".caption");

        let document = Html::parse_document(html);

        let page_title = dom::parse_selector(&self.config.selectors.title).and_then(|sel| {
            document
                .select(&sel)
                .map(|el| dom::element_text(el))
                .find(|t| !t.is_empty())
        });

        let mut works = Vec::new();
        for el in document.select(&container_selector) {
            let mut caption = el
                .value()
                .attr(&works_config.caption_attr)
                .map(str::to_string)
                .filter(|c| !c.trim().is_empty());

            let (full, thumb) = match el.value().name() {
                // Standard gallery: <a href=full><img src=thumb></a>
                "a" => {
                    let full = el.value().attr("href").and_then(|href| self.abs(href));
                    let img = el.select(&img_selector).next();
                    let thumb = img
                        .and_then(dom::image_src)
                        .and_then(|src| self.abs(src));
                    if caption.is_none() {
                        caption = img
                            .and_then(|i| i.value().attr("alt"))
                            .map(str::to_string)
                            .filter(|c| !c.trim().is_empty());
                    }
                    (full, thumb)
                }
                // Carousel: a bare <img> is both full and thumb
                "img" => {
                    let full = dom::image_src(el).and_then(|src| self.abs(src));
                    if caption.is_none() {
                        caption = el
                            .value()
                            .attr("alt")
                            .map(str::to_string)
                            .filter(|c| !c.trim().is_empty());
                    }
                    (full.clone(), full)
                }
                // Wrapper element containing an <img>
                _ => {
                    let img = el.select(&img_selector).next();
                    let full = img
                        .and_then(dom::image_src)
                        .and_then(|src| self.abs(src));
                    if caption.is_none() {
                        caption = img
                            .and_then(|i| i.value().attr("alt"))
                            .map(str::to_string)
                            .filter(|c| !c.trim().is_empty());
                    }
                    (full.clone(), full)
                }
            };

            if caption.is_none() {
                caption = caption_selector
                    .as_ref()
                    .and_then(|sel| el.select(sel).next())
                    .map(dom::element_text)
                    .filter(|c| !c.is_empty());
            }
            if caption.is_none() {
                caption = page_title.clone();
            }

            if let Some(full) = full {
                works.push(LocaleWork {
                    full,
                    thumb,
                    caption,
                });
            }
        }

        works
    }

    /// Installation views, scraped from the canonical page only.
    async fn scrape_installations(&self, slug: &str) -> Vec<ScrapedInstallation> {
        let Some(installations_config) = self.config.selectors.installations.clone() else {
            self.logs
                .info("Installation scraping skipped (not configured)");
            return Vec::new();
        };
        let Some(url) = self.abs(&self.config.detail_url(slug, Locale::En)) else {
            return Vec::new();
        };

        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                self.logs.error(
                    "Failed to fetch installation gallery",
                    Some(serde_json::json!(e.to_string())),
                );
                return Vec::new();
            }
        };

        let Some(selector) = dom::parse_selector(&installations_config.selector) else {
            self.logs.warn(
                format!(
                    "Invalid installations selector {:?}",
                    installations_config.selector
                ),
                None,
            );
            return Vec::new();
        };

        let document = Html::parse_document(&html);
        let installations: Vec<ScrapedInstallation> = document
            .select(&selector)
            .filter_map(|el| dom::image_src(el))
            .filter_map(|src| self.abs(src))
            .map(|full| ScrapedInstallation { full })
            .collect();

        self.logs
            .info(format!("Found {} installations", installations.len()));
        installations
    }
}

/// Merge per-locale galleries by full-image URL: canonical entries
/// first (attaching the alternate caption where the URL matches), then
/// alternate-only entries. At most one record per distinct URL.
fn merge_works(en: Vec<LocaleWork>, fa: Vec<LocaleWork>) -> Vec<ScrapedWork> {
    let fa_by_full: HashMap<String, LocaleWork> = fa
        .iter()
        .map(|w| (w.full.clone(), w.clone()))
        .collect();

    let mut merged: Vec<ScrapedWork> = Vec::new();
    for work in en {
        if merged.iter().any(|m| m.full == work.full) {
            continue;
        }
        let fa_caption = fa_by_full.get(&work.full).and_then(|f| f.caption.clone());
        merged.push(ScrapedWork {
            full: work.full,
            thumb: work.thumb,
            caption_en: work.caption,
            caption_fa: fa_caption,
        });
    }

    for work in fa {
        if merged.iter().any(|m| m.full == work.full) {
            continue;
        }
        merged.push(ScrapedWork {
            full: work.full,
            thumb: work.thumb,
            caption_en: None,
            caption_fa: work.caption,
        });
    }

    merged
}
