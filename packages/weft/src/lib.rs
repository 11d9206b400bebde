//! A permissive HTML processor built for offline static-site generation: documents are parsed
//! into a five-kind node tree with aggressive error recovery, user-authored component
//! definitions (`<def-*>` elements) are expanded against their invocations with lexical
//! scoping, props, and slots, and the result is written back out as HTML. This will *not*
//! attempt full HTML5 conformance: there is no character-reference decoding, no scripting,
//! and no adoption-agency tree surgery. It parses the structural outline of a file well enough
//! to rewrite it faithfully, and treats everything between tags as opaque bytes.
//!
//! The expansion engine is the only part of the crate with non-local behaviour: definitions
//! are collected into a chain of lexical scopes, invocations are replaced in place by a
//! hygienically cloned copy of the matching definition body, and `<prop>`/`<slot>` elements
//! inside that body are substituted from the invocation's attributes and children. Cycles and
//! runaway nesting are detected and reported rather than looping.

pub mod error;
mod encode;
mod expand;
mod parser;
mod report;
mod scope;
mod serialize;
pub mod tagset;

// Using this structure so the test modules can share parse/expand helpers
#[cfg(test)]
pub mod tests;

pub use error::{Diagnostic, Severity};
pub use expand::{expand_document, MAX_EXPANSION_DEPTH};
pub use parser::parse_html;
pub use report::Report;
pub use serialize::to_html;

/// A single attribute on an element. Names are normalised to ASCII lowercase by the parser;
/// values are stored with their outer quotes stripped but are otherwise byte-exact (no
/// character-reference decoding).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A node in a parsed document tree.
///
/// The parser is the sole producer of these, and the expansion engine is the sole mutator.
/// Children are owned exclusively by their parent, so dropping a node drops its whole
/// subtree; there are no parent back-pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// The unique root of a parsed file. Carries no tag and no attributes.
    Document { children: Vec<Node> },
    /// An element with a non-empty, lowercased tag name. Attribute order is preserved on
    /// serialisation, and duplicate names are representable (lookup returns the first).
    Element {
        tag: String,
        attrs: Vec<Attribute>,
        children: Vec<Node>,
    },
    /// Verbatim text content. Entities are *not* decoded, by design: what was read is what
    /// will be written.
    Text(String),
    /// The interior of a `<!-- -->` comment, excluding the delimiters.
    Comment(String),
    /// The interior of a `<! >` declaration (e.g. a doctype), excluding the delimiters.
    Declaration(String),
}

impl Node {
    /// Creates an empty document root.
    pub fn document() -> Self {
        Node::Document {
            children: Vec::new(),
        }
    }
    /// Creates an element with no attributes and no children.
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }
    /// Creates a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Gets the tag name, if this node is an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Gets the value of the *first* attribute with the given name. Duplicate attribute
    /// names are permitted on parse, but only the first is ever observed.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }
    /// Appends an attribute. This performs no duplicate checking, matching the parser's
    /// behaviour of recording whatever was written.
    pub fn push_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        if let Node::Element { attrs, .. } = self {
            attrs.push(Attribute {
                name: name.into(),
                value: value.into(),
            });
        }
    }
    /// Removes the first attribute with the given name, if any. Later duplicates survive,
    /// which keeps removal symmetric with [`Self::attr`].
    pub fn remove_attr(&mut self, name: &str) {
        if let Node::Element { attrs, .. } = self {
            if let Some(idx) = attrs.iter().position(|a| a.name == name) {
                attrs.remove(idx);
            }
        }
    }

    /// Gets the children of this node. Leaf kinds (text, comments, declarations) have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children } | Node::Element { children, .. } => children,
            _ => &[],
        }
    }
    /// Gets the children of this node mutably, as a slice. The tree structure itself can
    /// only be changed through [`Self::push_child`] and [`Self::replace_child`].
    pub fn children_mut(&mut self) -> &mut [Node] {
        match self {
            Node::Document { children } | Node::Element { children, .. } => children,
            _ => &mut [],
        }
    }
    /// Removes the children from this node and returns them, leaving the node itself
    /// intact. Used by the expansion engine to detach fully-expanded content from a
    /// synthetic root.
    pub fn take_children(&mut self) -> Vec<Node> {
        match self {
            Node::Document { children } | Node::Element { children, .. } => {
                std::mem::take(children)
            }
            _ => Vec::new(),
        }
    }
    /// Adds a child to the end of this node's children. A no-op on leaf kinds.
    pub fn push_child(&mut self, child: Node) {
        if let Node::Document { children } | Node::Element { children, .. } = self {
            children.push(child);
        }
    }

    /// Splices the child at `idx` out of the tree, dropping it, and inserts the given
    /// replacement sequence (possibly empty, possibly several nodes) in its place. Later
    /// siblings shift to make room. Out-of-range indices and leaf kinds are ignored.
    pub fn replace_child(&mut self, idx: usize, replacements: Vec<Node>) {
        if let Node::Document { children } | Node::Element { children, .. } = self {
            if idx < children.len() {
                children.splice(idx..=idx, replacements);
            }
        }
    }
}
