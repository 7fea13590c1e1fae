// src/services/extract.rs

//! Profile card and pagination extraction.
//!
//! Creator directories vary in markup, so both card discovery and
//! next-page discovery try an ordered list of selector strategies and
//! take the first that yields anything. The traversal loop only consumes
//! the result: candidates plus an optional next-page URL.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Candidate, ExtractedPage};
use crate::utils::email;
use crate::utils::url::resolve;

/// Generic card selectors that cover most creator platforms.
const CARD_SELECTOR: &str = ".creator-card, .profile-card, .user-card, article, .member";

/// Fallback when none of the generic card selectors match.
const CARD_FALLBACK_SELECTOR: &str =
    r#"div[class*="profile"], div[class*="creator"], div[class*="user"]"#;

const NAME_SELECTOR: &str = ".name, .creator-name, h2, h3";

/// Pagination strategies tried in order: selector plus the attribute
/// carrying the target URL.
const NEXT_STRATEGIES: [(&str, &str); 5] = [
    (".next", "href"),
    (".pagination-next", "href"),
    (r#"a[rel="next"]"#, "href"),
    (".page-link.next", "href"),
    ("button.next", "data-href"),
];

/// Extracts profile candidates and the next-page locator from one page.
pub struct ProfileExtractor {
    card_selector: Selector,
    card_fallback: Selector,
    name_selector: Selector,
    anchor_selector: Selector,
    mailto_selector: Selector,
    next_strategies: Vec<(Selector, &'static str)>,
}

impl ProfileExtractor {
    /// Parse all selector strategies up front.
    pub fn new() -> Result<Self> {
        let next_strategies = NEXT_STRATEGIES
            .iter()
            .map(|(sel, attr)| Ok((parse_selector(sel)?, *attr)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            card_selector: parse_selector(CARD_SELECTOR)?,
            card_fallback: parse_selector(CARD_FALLBACK_SELECTOR)?,
            name_selector: parse_selector(NAME_SELECTOR)?,
            anchor_selector: parse_selector("a")?,
            mailto_selector: parse_selector(r#"a[href^="mailto:"]"#)?,
            next_strategies,
        })
    }

    /// Extract all candidates and the next-page URL from one rendered page.
    pub fn extract(&self, html: &str, page_url: &str) -> ExtractedPage {
        let document = Html::parse_document(html);

        let mut cards: Vec<ElementRef> = document.select(&self.card_selector).collect();
        if cards.is_empty() {
            cards = document.select(&self.card_fallback).collect();
        }

        let candidates = cards
            .iter()
            .filter_map(|card| self.extract_candidate(card, page_url))
            .collect();

        ExtractedPage {
            candidates,
            next_page: self.find_next_page(&document, page_url),
        }
    }

    fn extract_candidate(&self, card: &ElementRef, page_url: &str) -> Option<Candidate> {
        let link_elem = card.select(&self.anchor_selector).next()?;
        let raw_link = link_elem.value().attr("href")?;
        let link = resolve(page_url, raw_link);

        let name = self
            .extract_name(card)
            .or_else(|| non_empty_text(&link_elem))?;

        Some(Candidate {
            name,
            email: self.extract_email(card),
            link,
        })
    }

    fn extract_name(&self, card: &ElementRef) -> Option<String> {
        card.select(&self.name_selector)
            .find_map(|el| non_empty_text(&el))
    }

    fn extract_email(&self, card: &ElementRef) -> Option<String> {
        // Prefer an explicit mailto link, fall back to an email-looking
        // token anywhere in the card's text.
        if let Some(el) = card.select(&self.mailto_selector).next() {
            if let Some(href) = el.value().attr("href") {
                let address = href.trim_start_matches("mailto:").trim();
                if !address.is_empty() {
                    return Some(address.to_string());
                }
            }
        }

        let text: String = card.text().collect::<Vec<_>>().join(" ");
        email::find_in_text(&text)
    }

    fn find_next_page(&self, document: &Html, page_url: &str) -> Option<String> {
        for (selector, attr) in &self.next_strategies {
            if let Some(href) = document
                .select(selector)
                .find_map(|el| el.value().attr(attr))
            {
                return Some(resolve(page_url, href));
            }
        }

        // Last resort: any anchor labelled "Next".
        document
            .select(&self.anchor_selector)
            .find(|el| {
                let text: String = el.text().collect();
                text.contains("Next") || text.contains("next")
            })
            .and_then(|el| el.value().attr("href"))
            .map(|href| resolve(page_url, href))
    }
}

fn non_empty_text(el: &ElementRef) -> Option<String> {
    let text: String = el.text().collect();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
