//! Structural signatures of the site's markup
//!
//! The listing and detail pages are an undocumented, externally controlled
//! format that has already changed layout once. Every selector the harvester
//! relies on lives here, behind one accessor per field, so adapting to a new
//! layout means adding a [`MarkupSignatures`] value and nothing else.
//!
//! Known layouts:
//!
//! ```text
//! legacy:
//! <div class="tv-widget-idea js-userlink-popup-anchor">
//!     <div class="tv-widget-idea__title-row">
//!         <a class="tv-widget-idea__title" href="/chart/...">Title</a>
//!     </div>
//!     <span data-timestamp="1681739102.0"></span>
//!     <span class="tv-card-user-info__name">author</span>
//! </div>
//! detail: <div class="tv-chart-view__description">body</div>
//!
//! current:
//! <article class="card-exterior-Us1ZHpvJ">
//!     <a data-qa-id="ui-lib-card-link-title" href="/chart/...">Title</a>
//!     <span class="card-author-BhFUdJAZ">by author</span>
//!     <time datetime="2023-04-17T13:45:02.000Z"></time>
//!     <a data-qa-id="ui-lib-card-link-paragraph">inline description</a>
//! </article>
//! detail: <div class="content-..."><span class="idea-description-...">body</span></div>
//! ```

use crate::config::SchemaVersion;
use crate::HarvestError;
use scraper::{ElementRef, Html, Selector};

/// One layout of the site, as CSS selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupSignatures {
    /// Name used in logs
    pub name: &'static str,
    /// A post card on the listing page
    pub card: &'static str,
    /// Element carrying the publication time, relative to the card
    pub timestamp: &'static str,
    /// Attribute of `timestamp` holding the value
    pub timestamp_attr: &'static str,
    /// Anchor holding both the title text and the permalink
    pub title_link: &'static str,
    /// Author name, relative to the card
    pub author: &'static str,
    /// Inline description on the listing page, if the layout has one
    pub snippet: Option<&'static str>,
    /// Body container on the detail page
    pub detail_body: &'static str,
}

pub const LEGACY_SIGNATURES: MarkupSignatures = MarkupSignatures {
    name: "legacy",
    card: "div.tv-widget-idea.js-userlink-popup-anchor",
    timestamp: "span[data-timestamp]",
    timestamp_attr: "data-timestamp",
    title_link: "div.tv-widget-idea__title-row a.tv-widget-idea__title[href]",
    author: "span.tv-card-user-info__name",
    snippet: None,
    detail_body: "div.tv-chart-view__description",
};

pub const CURRENT_SIGNATURES: MarkupSignatures = MarkupSignatures {
    name: "current",
    card: "article[class*=\"card-exterior-\"]",
    timestamp: "time[datetime]",
    timestamp_attr: "datetime",
    title_link: "a[data-qa-id=\"ui-lib-card-link-title\"][href]",
    author: "span[class*=\"card-author-\"]",
    snippet: Some("a[data-qa-id=\"ui-lib-card-link-paragraph\"]"),
    detail_body: "span[class*=\"idea-description-\"]",
};

impl SchemaVersion {
    /// Layouts to try for this version, in order of preference
    pub fn signatures(self) -> &'static [MarkupSignatures] {
        match self {
            SchemaVersion::Auto => &[CURRENT_SIGNATURES, LEGACY_SIGNATURES],
            SchemaVersion::Current => &[CURRENT_SIGNATURES],
            SchemaVersion::Legacy => &[LEGACY_SIGNATURES],
        }
    }
}

/// A layout with its selectors compiled
#[derive(Debug)]
pub struct MarkupSchema {
    name: &'static str,
    card: Selector,
    timestamp: Selector,
    timestamp_attr: &'static str,
    title_link: Selector,
    author: Selector,
    snippet: Option<Selector>,
    detail_body: Selector,
}

impl MarkupSchema {
    /// Compiles every selector of a layout
    pub fn compile(signatures: &MarkupSignatures) -> Result<Self, HarvestError> {
        Ok(Self {
            name: signatures.name,
            card: compile_selector(signatures.card)?,
            timestamp: compile_selector(signatures.timestamp)?,
            timestamp_attr: signatures.timestamp_attr,
            title_link: compile_selector(signatures.title_link)?,
            author: compile_selector(signatures.author)?,
            snippet: signatures.snippet.map(compile_selector).transpose()?,
            detail_body: compile_selector(signatures.detail_body)?,
        })
    }

    /// Compiles the layouts of a schema version, in order of preference
    pub fn for_version(version: SchemaVersion) -> Result<Vec<Self>, HarvestError> {
        version.signatures().iter().map(Self::compile).collect()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Every card block in the listing, in document order
    pub fn card_blocks<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        document.select(&self.card)
    }

    /// Raw publication time of a card
    pub fn timestamp_of(&self, card: ElementRef<'_>) -> Option<String> {
        card.select(&self.timestamp)
            .next()
            .and_then(|element| element.value().attr(self.timestamp_attr))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Title text of a card
    pub fn title_of(&self, card: ElementRef<'_>) -> Option<String> {
        card.select(&self.title_link)
            .next()
            .map(element_text)
            .filter(|title| !title.is_empty())
    }

    /// Permalink of a card, as written in the markup
    pub fn link_of(&self, card: ElementRef<'_>) -> Option<String> {
        card.select(&self.title_link)
            .next()
            .and_then(|element| element.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
    }

    /// Author name of a card, without a leading "by"
    pub fn author_of(&self, card: ElementRef<'_>) -> Option<String> {
        card.select(&self.author)
            .next()
            .map(element_text)
            .map(|author| match author.strip_prefix("by ") {
                Some(stripped) => stripped.trim().to_string(),
                None => author,
            })
            .filter(|author| !author.is_empty())
    }

    /// Inline description of a card, when the layout carries one
    pub fn snippet_of(&self, card: ElementRef<'_>) -> Option<String> {
        let selector = self.snippet.as_ref()?;
        card.select(selector)
            .next()
            .map(element_text)
            .filter(|snippet| !snippet.is_empty())
    }

    /// Raw body text of a detail page
    pub fn detail_body_of(&self, document: &Html) -> Option<String> {
        document
            .select(&self.detail_body)
            .next()
            .map(|element| element.text().collect::<String>())
            .filter(|body| !body.trim().is_empty())
    }
}

fn compile_selector(selector: &str) -> Result<Selector, HarvestError> {
    Selector::parse(selector).map_err(|e| HarvestError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Concatenated, trimmed text content of an element
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
