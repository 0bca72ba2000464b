//! Field extraction: turning a structural path into zero-or-one string value
//!
//! Extraction is deterministic and pure: the same (document, rule) pair
//! always yields the same result, and a rule that matches nothing yields an
//! absent value rather than an error.

use crate::path::{find_first, DomNode, StructuralPath};

/// How the matched node is converted into a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionMode {
    /// The value of a named attribute, e.g. `href`.
    Attribute(String),
    /// The node's trimmed text content.
    Text,
    /// The nth trimmed text node following the matched node among its
    /// parent's children. Used when a label and its value are sibling nodes
    /// under a common parent, e.g. `<strong>Listing Number:</strong> 12345`.
    /// The ordinal is per-rule configuration, not a hard-coded assumption;
    /// `index` 0 is the first following text node.
    TextFollowingLabel { index: usize },
}

impl ExtractionMode {
    pub fn attribute(name: impl Into<String>) -> Self {
        ExtractionMode::Attribute(name.into())
    }

    pub fn following_text() -> Self {
        ExtractionMode::TextFollowingLabel { index: 0 }
    }
}

/// A structural path plus the extraction mode applied at its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRule {
    pub path: StructuralPath,
    pub mode: ExtractionMode,
}

impl ExtractionRule {
    pub fn new(path: StructuralPath, mode: ExtractionMode) -> Self {
        ExtractionRule { path, mode }
    }
}

/// Applies a rule beneath `root`, using only the first matching node in
/// pre-order. Returns `None` when the path matches nothing or the matched
/// node cannot produce a value in the requested mode.
pub fn extract<N: DomNode>(root: &N, rule: &ExtractionRule) -> Option<String> {
    let node = find_first(root, &rule.path)?;
    match &rule.mode {
        ExtractionMode::Attribute(name) => node.attribute(name).map(|v| v.trim().to_string()),
        ExtractionMode::Text => {
            let text = node.text().trim().to_string();
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }
        ExtractionMode::TextFollowingLabel { index } => {
            node.following_texts().get(*index).cloned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::path::{PathStep, TextMatch};
    use url::Url;

    fn doc(body: &str) -> Document {
        let url = Url::parse("https://example.com/detail").unwrap();
        Document::parse(body, url, None).unwrap()
    }

    #[test]
    fn test_attribute_extraction() {
        let d = doc(r#"<html><body><h2><a href="/Property/1/EST1/A">x</a></h2></body></html>"#);
        let rule = ExtractionRule::new(
            StructuralPath::begin(PathStep::tag("h2")).then(PathStep::tag("a")),
            ExtractionMode::attribute("href"),
        );
        assert_eq!(extract(&d.root(), &rule), Some("/Property/1/EST1/A".into()));
    }

    #[test]
    fn test_text_extraction_trims() {
        let d = doc(r#"<html><body><h2 class="detailAddress">  12 Main Road, Kenilworth  </h2></body></html>"#);
        let rule = ExtractionRule::new(
            StructuralPath::begin(PathStep::tag("h2").with_class("detailAddress")),
            ExtractionMode::Text,
        );
        assert_eq!(
            extract(&d.root(), &rule),
            Some("12 Main Road, Kenilworth".into())
        );
    }

    #[test]
    fn test_following_text_after_label() {
        let d = doc(
            r#"<html><body><div class="listingInfo"><span><strong>Listing Number:</strong> 12345</span></div></body></html>"#,
        );
        let rule = ExtractionRule::new(
            StructuralPath::begin(
                PathStep::tag("strong")
                    .with_text(TextMatch::Equals("Listing Number:".to_string())),
            ),
            ExtractionMode::following_text(),
        );
        assert_eq!(extract(&d.root(), &rule), Some("12345".into()));
    }

    #[test]
    fn test_following_text_configurable_ordinal() {
        let d = doc(
            r#"<html><body><li><span>Land size:</span> approx. <b>-</b> 1200 sqm</li></body></html>"#,
        );
        let rule = ExtractionRule::new(
            StructuralPath::begin(PathStep::tag("span")),
            ExtractionMode::TextFollowingLabel { index: 1 },
        );
        assert_eq!(extract(&d.root(), &rule), Some("1200 sqm".into()));
    }

    #[test]
    fn test_following_text_absent_when_out_of_range() {
        let d = doc(r#"<html><body><li><span>Label</span></li></body></html>"#);
        let rule = ExtractionRule::new(
            StructuralPath::begin(PathStep::tag("span")),
            ExtractionMode::following_text(),
        );
        assert_eq!(extract(&d.root(), &rule), None);
    }

    #[test]
    fn test_absent_on_no_match() {
        let d = doc(r#"<html><body><p>nothing here</p></body></html>"#);
        let rule = ExtractionRule::new(
            StructuralPath::begin(PathStep::tag("h3").with_id("listingViewDisplayPrice")),
            ExtractionMode::Text,
        );
        assert_eq!(extract(&d.root(), &rule), None);
    }

    #[test]
    fn test_missing_attribute_is_absent() {
        let d = doc(r#"<html><body><a>no href</a></body></html>"#);
        let rule = ExtractionRule::new(
            StructuralPath::begin(PathStep::tag("a")),
            ExtractionMode::attribute("href"),
        );
        assert_eq!(extract(&d.root(), &rule), None);
    }

    #[test]
    fn test_first_match_wins() {
        let d = doc(
            r#"<html><body><span class="price">R 1 000 000</span><span class="price">R 2 000 000</span></body></html>"#,
        );
        let rule = ExtractionRule::new(
            StructuralPath::begin(PathStep::tag("span").with_class("price")),
            ExtractionMode::Text,
        );
        assert_eq!(extract(&d.root(), &rule), Some("R 1 000 000".into()));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let d = doc(r#"<html><body><h3 id="p">R 795 000</h3></body></html>"#);
        let rule = ExtractionRule::new(
            StructuralPath::begin(PathStep::tag("h3").with_id("p")),
            ExtractionMode::Text,
        );
        let first = extract(&d.root(), &rule);
        let second = extract(&d.root(), &rule);
        assert_eq!(first, second);
    }
}
