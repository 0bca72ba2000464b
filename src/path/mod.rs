//! Structural paths: typed descriptions of how to locate a node in an HTML tree
//!
//! A [`StructuralPath`] is an ordered sequence of node-match steps. Each step
//! names a tag and optionally narrows by id, class set, and a text predicate,
//! and declares how it combines with the previous step (search the whole
//! subtree, or look only at the immediately following element sibling).
//! Paths are immutable once built; a path with zero steps is invalid and
//! cannot be constructed.

mod matcher;
mod node;

pub use matcher::{find_all, find_first};
pub use node::DomNode;

use crate::ConfigError;

/// How a step relates to the node(s) matched by the previous step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Search the entire subtree of each previously matched node.
    Descendant,
    /// Match only the element sibling immediately following a matched node.
    NextSibling,
}

/// Text predicate applied to an element's (trimmed) text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextMatch {
    Equals(String),
    Contains(String),
}

impl TextMatch {
    fn matches(&self, text: &str) -> bool {
        match self {
            TextMatch::Equals(expected) => text.trim() == expected,
            TextMatch::Contains(needle) => text.contains(needle.as_str()),
        }
    }
}

/// One node-match step of a structural path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: Option<TextMatch>,
    combinator: Combinator,
}

impl PathStep {
    /// Creates a descendant step matching the given tag name.
    pub fn tag(tag: impl Into<String>) -> Self {
        PathStep {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            text: None,
            combinator: Combinator::Descendant,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: TextMatch) -> Self {
        self.text = Some(text);
        self
    }

    pub fn as_sibling(mut self) -> Self {
        self.combinator = Combinator::NextSibling;
        self
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// Tests whether a node satisfies this step's tag/id/class/text criteria.
    pub fn matches<N: DomNode>(&self, node: &N) -> bool {
        if !node.tag_name().eq_ignore_ascii_case(&self.tag) {
            return false;
        }
        if let Some(id) = &self.id {
            if node.id() != Some(id.as_str()) {
                return false;
            }
        }
        for class in &self.classes {
            if !node.has_class(class) {
                return false;
            }
        }
        if let Some(text) = &self.text {
            if !text.matches(&node.text()) {
                return false;
            }
        }
        true
    }
}

/// An ordered, non-empty sequence of node-match steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralPath {
    steps: Vec<PathStep>,
}

impl StructuralPath {
    /// Starts a path from its first step. The first step always searches
    /// the subtree of the matching root, so its combinator is forced to
    /// `Descendant`.
    pub fn begin(step: PathStep) -> Self {
        let mut step = step;
        step.combinator = Combinator::Descendant;
        StructuralPath { steps: vec![step] }
    }

    /// Appends a descendant step.
    pub fn then(mut self, step: PathStep) -> Self {
        let mut step = step;
        step.combinator = Combinator::Descendant;
        self.steps.push(step);
        self
    }

    /// Appends an immediate-next-sibling step.
    pub fn then_sibling(mut self, step: PathStep) -> Self {
        let mut step = step;
        step.combinator = Combinator::NextSibling;
        self.steps.push(step);
        self
    }

    /// Builds a path from pre-assembled steps. Empty step lists are invalid.
    pub fn from_steps(steps: Vec<PathStep>) -> Result<Self, ConfigError> {
        if steps.is_empty() {
            return Err(ConfigError::Validation(
                "structural path must have at least one step".to_string(),
            ));
        }
        Ok(StructuralPath { steps })
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}
