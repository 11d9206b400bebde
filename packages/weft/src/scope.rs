//! Lexical scoping for component definitions. A scope is a frame in a linked chain: symbols
//! defined in an inner frame shadow the same symbol in outer frames, and only duplicates
//! within a single frame are illegal (the caller checks with [`Scope::get_local`] before
//! inserting).

use crate::Node;
use indexmap::IndexMap;

/// One frame of definitions, linked to its enclosing frame. Each registered definition is a
/// cloned `<def-*>` element, so it stays valid after the original is removed from the
/// document tree and is never aliased by an expansion.
pub struct Scope<'p> {
    parent: Option<&'p Scope<'p>>,
    defs: IndexMap<String, Node>,
}

impl<'p> Scope<'p> {
    pub fn new(parent: Option<&'p Scope<'p>>) -> Self {
        Self {
            parent,
            defs: IndexMap::new(),
        }
    }

    /// Looks a symbol up in this frame only, ignoring the chain.
    pub fn get_local(&self, symbol: &str) -> Option<&Node> {
        self.defs.get(symbol)
    }

    /// Registers a definition in this frame, shadowing any outer definition of the same
    /// symbol.
    pub fn insert(&mut self, symbol: impl Into<String>, definition: Node) {
        self.defs.insert(symbol.into(), definition);
    }

    /// Resolves a symbol by walking the chain from this frame outward to the root.
    pub fn resolve(&self, symbol: &str) -> Option<&Node> {
        match self.defs.get(symbol) {
            Some(definition) => Some(definition),
            None => self.parent.and_then(|parent| parent.resolve(symbol)),
        }
    }
}
