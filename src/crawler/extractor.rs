//! Main-content extraction from fetched pages
//!
//! Given a page body, this module picks the title, the primary textual
//! content, and the raw hyperlinks. Script and style subtrees never
//! contribute text. The content region is chosen by a fixed priority
//! chain of selectors, falling back to the whole body.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};

/// Content region candidates, tried in order; the first match wins.
/// Extending the heuristic means appending a selector here.
const CONTENT_SELECTORS: &[&str] = &["article", "main", ".content"];

/// Everything pulled out of a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    /// The page title, if the document has a non-empty `<title>`.
    /// Callers supply the URL fallback.
    pub title: Option<String>,

    /// Whitespace-normalized text of the content region. May be empty;
    /// the crawl engine decides whether to drop the page.
    pub text: String,

    /// Raw `href` values of every `<a>` on the page, in document order,
    /// unresolved. Scoping decisions belong to the link resolver.
    pub links: Vec<String>,
}

/// Parses a page body and extracts title, content text, and hyperlinks.
pub fn extract(html: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let text = match select_content_region(&document) {
        Some(region) => normalize_whitespace(&collect_text(region)),
        None => String::new(),
    };
    let links = extract_hrefs(&document);

    ExtractedPage { title, text, links }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Picks the content region: first match of the priority chain, else the
/// document body.
fn select_content_region(document: &Html) -> Option<ElementRef<'_>> {
    for css in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            return Some(element);
        }
    }

    let body = Selector::parse("body").ok()?;
    document.select(&body).next()
}

/// Collects the visible text of an element, joining text nodes with a
/// single space and skipping script/style subtrees entirely.
fn collect_text(element: ElementRef<'_>) -> String {
    let mut buf = String::new();
    push_text(*element, &mut buf);
    buf
}

fn push_text(node: NodeRef<'_, Node>, buf: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Element(element) => {
                if matches!(element.name(), "script" | "style") {
                    continue;
                }
                push_text(child, buf);
            }
            Node::Text(text) => {
                buf.push_str(&text.text);
                buf.push(' ');
            }
            _ => {}
        }
    }
}

/// Raw href attributes of every anchor, in document order.
fn extract_hrefs(document: &Html) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                links.push(href.to_string());
            }
        }
    }

    links
}

/// Collapses all runs of whitespace (including newlines and tabs) to
/// single spaces and trims the ends.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
