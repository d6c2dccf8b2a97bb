//! # Seine HTML
//!
//! Scraper-based implementation of the [`HtmlExtractor`] port. The parser is
//! lenient: malformed markup never raises, it just yields whatever content
//! survives parsing.

use scraper::{ElementRef, Html, Selector};
use seine_types::HtmlExtractor;
use url::Url;

/// Tags whose text is never user-visible page content.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "head", "title", "template"];

/// DOM-based page extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageExtractor;

impl PageExtractor {
    fn title_selector() -> Selector {
        Selector::parse("title").expect("static selector")
    }

    fn anchor_selector() -> Selector {
        Selector::parse("a[href]").expect("static selector")
    }
}

impl HtmlExtractor for PageExtractor {
    fn extract_title(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let element = document.select(&Self::title_selector()).next()?;
        let title = element.text().collect::<String>();
        let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }

    fn extract_text(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let mut fragments = Vec::new();
        collect_visible_text(document.root_element(), &mut fragments);

        let text = fragments
            .iter()
            .flat_map(|fragment| fragment.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn extract_links(&self, html: &str, base_url: &Url) -> Vec<Url> {
        let document = Html::parse_document(html);
        document
            .select(&Self::anchor_selector())
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter_map(|href| base_url.join(href).ok())
            .collect()
    }
}

/// Depth-first text collection skipping non-content subtrees.
fn collect_visible_text(element: ElementRef<'_>, out: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push(text.to_string());
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !SKIPPED_TAGS.contains(&child_element.value().name()) {
                collect_visible_text(child_element, out);
            }
        }
    }
}
