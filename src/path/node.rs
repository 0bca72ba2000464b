//! Abstract node capabilities required by the structural matcher
//!
//! The matcher never touches the concrete parse tree directly; it works
//! against this trait so the extraction engine stays independent of the
//! HTML library. The production implementation lives in [`crate::document`]
//! and wraps `scraper::ElementRef`.

/// Capabilities of one element node in a parsed document tree.
pub trait DomNode: Clone {
    /// Lowercase tag name, e.g. `"div"`.
    fn tag_name(&self) -> &str;

    /// Value of the `id` attribute, if present.
    fn id(&self) -> Option<&str>;

    /// Whether the `class` attribute contains the given class name.
    fn has_class(&self, class: &str) -> bool;

    /// Value of an arbitrary attribute, if present.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Concatenated text content of the node and its descendants.
    fn text(&self) -> String;

    /// Element children in document order.
    fn children(&self) -> Vec<Self>;

    /// The element sibling immediately following this node. Whitespace-only
    /// text and comments between the two do not break immediacy; a
    /// non-whitespace text node does.
    fn next_sibling_element(&self) -> Option<Self>;

    /// Trimmed, non-empty text nodes that follow this node among its
    /// parent's children, in document order.
    fn following_texts(&self) -> Vec<String>;

    /// Identity test: whether two handles refer to the same tree node.
    fn same_node(&self, other: &Self) -> bool;
}
