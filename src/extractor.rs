use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::utils::text::truncate_chars;

/// Class-name markers the board uses on listing containers. The groups can
/// overlap, so nested containers may surface more than once.
const CONTAINER_SELECTOR: &str = "div[class*='job'], div[class*='posting'], li[class*='job']";
/// Containers shorter than this are headers or navigation noise.
const MIN_CONTAINER_TEXT: usize = 50;
const TITLE_FALLBACK_CHARS: usize = 80;
/// Stored description length; the email digest truncates further for display.
pub const DESCRIPTION_CHARS: usize = 1000;

/// One candidate listing pulled out of the rendered page, before keyword
/// filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub title: String,
    pub url: String,
    pub text: String,
}

pub struct JobExtractor {
    base_url: Url,
    containers: Selector,
    headings: Selector,
    anchors: Selector,
}

impl JobExtractor {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            containers: Selector::parse(CONTAINER_SELECTOR)
                .map_err(|e| anyhow!("Invalid container selector: {:?}", e))?,
            headings: Selector::parse("h2, h3, a")
                .map_err(|e| anyhow!("Invalid heading selector: {:?}", e))?,
            anchors: Selector::parse("a[href]")
                .map_err(|e| anyhow!("Invalid anchor selector: {:?}", e))?,
        })
    }

    /// Pull candidate postings out of the rendered page HTML.
    pub fn extract(&self, html: &str) -> Vec<Candidate> {
        let document = Html::parse_document(html);
        let mut candidates = Vec::new();

        for container in document.select(&self.containers) {
            let text = element_text(&container);
            if text.chars().count() < MIN_CONTAINER_TEXT {
                continue;
            }

            let title = container
                .select(&self.headings)
                .next()
                .map(|heading| element_text(&heading))
                .unwrap_or_else(|| truncate_chars(&text, TITLE_FALLBACK_CHARS));

            let url = container
                .select(&self.anchors)
                .next()
                .and_then(|anchor| anchor.value().attr("href"))
                .map(|href| self.absolute_url(href))
                .unwrap_or_else(|| self.base_url.as_str().to_string());

            candidates.push(Candidate { title, url, text });
        }

        candidates
    }

    /// Root-relative hrefs are rewritten against the site origin; everything
    /// else passes through untouched.
    fn absolute_url(&self, href: &str) -> String {
        if href.starts_with('/') {
            format!("{}{}", self.base_url.origin().ascii_serialization(), href)
        } else {
            href.to_string()
        }
    }
}

/// Text nodes trimmed and concatenated. Entities are already decoded by the
/// HTML parser.
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect()
}
