//! Paragraph classification: narrative text vs contact/schedule blocks.
//!
//! The keyword table below is deliberately English/Persian-specific —
//! it mirrors the info blocks the gallery actually publishes (visiting
//! days, opening hours, phone lines, street address). Content in any
//! other language will classify as RICH_TEXT.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::models::{BlockType, ScrapedContentBlock};

/// English: day names, clock times, phone labels.
/// Persian: خیابان (street), دوشنبه (Monday), جمعه (Friday).
static INFO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b
        | \d \s* (?:am|pm) \b
        | \b(?:tel|tell|phone)\b
        | خیابان | دوشنبه | جمعه
        ",
    )
    .expect("info keyword pattern is valid")
});

/// Whether a paragraph reads as a contact/schedule block.
pub fn is_info_text(text: &str) -> bool {
    INFO_PATTERN.is_match(text)
}

/// Split a section's HTML into classified paragraph blocks.
pub fn split_blocks(section_html: &str, paragraph_selector: &Selector) -> Vec<ScrapedContentBlock> {
    let fragment = Html::parse_fragment(section_html);
    fragment
        .select(paragraph_selector)
        .map(|p| {
            let text = p.text().collect::<String>().trim().to_string();
            let block_type = if is_info_text(&text) {
                BlockType::Info
            } else {
                BlockType::RichText
            };
            ScrapedContentBlock {
                block_type,
                html: p.html(),
                text,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_lines_classify_as_info() {
        assert!(is_info_text("Monday–Friday, 10AM–6PM"));
        assert!(is_info_text("Tel: +98 21 8888 0000"));
        assert!(is_info_text("دوشنبه تا جمعه"));
    }

    #[test]
    fn ordinary_prose_classifies_as_rich_text() {
        assert!(!is_info_text(
            "Her practice examines the program of memory and dampness in Tehran."
        ));
        // "am" inside a word must not trigger the time-of-day rule
        assert!(!is_info_text("The drama of the frame is deliberate."));
    }

    #[test]
    fn split_blocks_classifies_each_paragraph() {
        let selector = Selector::parse("p").unwrap();
        let html = "<p>She paints in oil.</p><p>Saturday to Wednesday, 12PM-8PM</p>";
        let blocks = split_blocks(html, &selector);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].block_type, BlockType::RichText);
        assert_eq!(blocks[1].block_type, BlockType::Info);
        assert_eq!(blocks[0].text, "She paints in oil.");
        assert!(blocks[0].html.starts_with("<p>"));
    }
}
