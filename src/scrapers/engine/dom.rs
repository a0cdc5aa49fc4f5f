//! Small DOM and text helpers shared by the extraction passes.

use regex::RegexBuilder;
use scraper::{ElementRef, Selector};
use url::Url;

/// Zero-width non-joiner, inserted inside Persian words by some pages.
/// Keyword matching strips it so "زندگی‌نامه" and "زندگینامه" both hit.
const ZWNJ: char = '\u{200c}';

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Concatenated text of an element, trimmed at the ends only.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Concatenated text of an element, whitespace-collapsed.
pub fn element_text_collapsed(el: ElementRef<'_>) -> String {
    collapse_ws(&el.text().collect::<String>())
}

/// Strip invisible joining characters.
pub fn strip_joiners(s: &str) -> String {
    s.replace(ZWNJ, "")
}

/// Parse a CSS selector, `None` on syntax errors.
pub fn parse_selector(selector: &str) -> Option<Selector> {
    Selector::parse(selector).ok()
}

/// Join heading tags into one selector list (`h4, h2`).
pub fn heading_selector(tags: &[String]) -> Option<Selector> {
    if tags.is_empty() {
        return None;
    }
    parse_selector(&tags.join(", "))
}

/// Resolve an href against the site base URL. Handles absolute,
/// protocol-relative, and path-relative forms.
pub fn absolutize(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(|u| u.to_string())
}

/// Element siblings following `el`, in document order.
pub fn next_sibling_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

/// Case-insensitive keyword test. Keywords are regex patterns (configs
/// use "." to accept any heading); invalid patterns fall back to a
/// substring check.
pub fn keyword_matches(keyword: &str, text: &str) -> bool {
    match RegexBuilder::new(keyword).case_insensitive(true).build() {
        Ok(re) => re.is_match(text),
        Err(_) => text.to_lowercase().contains(&keyword.to_lowercase()),
    }
}

/// `src` with the common lazy-load fallback.
pub fn image_src<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    el.value().attr("src").or_else(|| el.value().attr("data-src"))
}

/// Last path segment of an href resolved against the base URL.
pub fn last_path_segment(base: &Url, href: &str) -> Option<String> {
    let url = base.join(href.trim()).ok()?;
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(|s| s.to_string())
}
