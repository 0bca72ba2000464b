//! Parsed HTML documents and the concrete [`DomNode`] implementation
//!
//! The parse tree itself is `scraper`'s; everything above this module talks
//! to it through [`HtmlNode`], which implements the node-capability trait
//! the structural matcher is written against. A [`Document`] also remembers
//! the URL it was loaded from (for resolving relative links) and the cache
//! key it was stored under (for deriving detail-page keys).

use crate::cache::CacheKey;
use crate::path::DomNode;
use crate::{GleanError, Result};
use scraper::{ElementRef, Html, Node};
use url::Url;

/// A parsed HTML document plus its provenance.
pub struct Document {
    url: Url,
    key: Option<CacheKey>,
    html: Html,
}

impl Document {
    /// Parses an HTML body fetched from (or cached for) `url`.
    ///
    /// The underlying parser recovers from arbitrary tag soup, so the only
    /// rejected input is an effectively empty body.
    pub fn parse(body: &str, url: Url, key: Option<CacheKey>) -> Result<Self> {
        if body.trim().is_empty() {
            return Err(GleanError::ParseFailed {
                url: url.to_string(),
                message: "document body is empty".to_string(),
            });
        }
        Ok(Document {
            html: Html::parse_document(body),
            url,
            key,
        })
    }

    /// The document's root element, as a matcher-compatible node.
    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode {
            el: self.html.root_element(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The cache key this document was resolved under, if any. Absent in
    /// read-through mode.
    pub fn key(&self) -> Option<&CacheKey> {
        self.key.as_ref()
    }

    /// Resolves a possibly relative href against this document's URL.
    pub fn join(&self, href: &str) -> std::result::Result<Url, url::ParseError> {
        self.url.join(href.trim())
    }
}

/// One element of a parsed document.
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a> {
    el: ElementRef<'a>,
}

impl<'a> HtmlNode<'a> {
    pub fn element(&self) -> ElementRef<'a> {
        self.el
    }
}

impl<'a> DomNode for HtmlNode<'a> {
    fn tag_name(&self) -> &str {
        self.el.value().name()
    }

    fn id(&self) -> Option<&str> {
        self.el.value().id()
    }

    fn has_class(&self, class: &str) -> bool {
        self.el.value().classes().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.el.value().attr(name)
    }

    fn text(&self) -> String {
        self.el.text().collect()
    }

    fn children(&self) -> Vec<Self> {
        self.el
            .children()
            .filter_map(ElementRef::wrap)
            .map(|el| HtmlNode { el })
            .collect()
    }

    fn next_sibling_element(&self) -> Option<Self> {
        for sibling in self.el.next_siblings() {
            if let Some(el) = ElementRef::wrap(sibling) {
                return Some(HtmlNode { el });
            }
            match sibling.value() {
                // Whitespace and comments do not break immediacy.
                Node::Text(t) if t.text.trim().is_empty() => continue,
                Node::Comment(_) => continue,
                // Anything else (non-whitespace text in particular) does.
                _ => return None,
            }
        }
        None
    }

    fn following_texts(&self) -> Vec<String> {
        self.el
            .next_siblings()
            .filter_map(|n| n.value().as_text())
            .map(|t| t.text.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn same_node(&self, other: &Self) -> bool {
        self.el.id() == other.el.id()
    }
}
