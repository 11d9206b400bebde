//! The component expansion engine: the one part of the crate with non-local behaviour.
//!
//! Each scope root (the document itself, or the synthetic root of one expansion) gets a
//! fresh [`Scope`] frame. `<def-*>` elements are captured into the frame (cloned) and
//! removed from the tree; descending into ordinary elements keeps using the same frame, so
//! a definition nested inside a native wrapper belongs to the enclosing scope and collides
//! with a same-symbol definition there. Any element whose tag is neither native nor reserved
//! is a candidate invocation, resolved against the scope chain. A resolved invocation is
//! replaced in place by a hygienically cloned copy of the definition body, with `<prop>` and
//! `<slot>` elements substituted from the invocation's attributes and children, and the
//! result is itself processed to a fixed point before it is spliced in. The cursor then
//! advances past the splice; nothing is re-scanned at the level it was inserted at.
//!
//! Expansion is guarded two ways: a per-document call stack of invocation tags catches
//! cycles, and a hard depth ceiling catches pathological (acyclic but unbounded) nesting.

use crate::error::Diagnostic;
use crate::scope::Scope;
use crate::{encode, tagset, Node, Report};
use indexmap::IndexMap;

/// The hard ceiling on nested expansions. Hitting it aborts the current invocation (which
/// stays in the tree) rather than recursing further.
pub const MAX_EXPANSION_DEPTH: usize = 64;

/// Expands every component invocation in the document, in place. Definitions are removed
/// from the tree, invocations are replaced by their expanded bodies, and anything
/// unresolvable is reported and left as it was.
pub fn expand_document(document: &mut Node, report: &mut Report) {
    let mut call_stack = Vec::new();
    process_scope(document, None, &mut call_stack, 0, report);
}

/// What the per-child loop decided to do with one child, computed from a shared borrow
/// before any mutation happens.
enum Step {
    /// Not an element; nothing to do at this level.
    Skip,
    /// A `def-*` element: already captured during collection, remove it from the tree.
    RemoveDefinition,
    /// A native or reserved element: descend into its children with the same scope frame.
    Descend,
    /// A candidate invocation to resolve against the scope chain.
    Invoke(String),
}

/// Opens a fresh scope frame for a scope root and processes its children. Only true scope
/// roots come through here: the document, and the synthetic root of each expansion.
fn process_scope(
    root: &mut Node,
    parent: Option<&Scope>,
    call_stack: &mut Vec<String>,
    depth: usize,
    report: &mut Report,
) {
    let mut local = Scope::new(parent);
    process_children(root, &mut local, call_stack, depth, report);
}

/// Processes one node's children against the given scope frame. Definitions directly
/// underneath the node are collected into the frame first; descents into native, reserved,
/// and unresolved elements re-enter here with the *same* frame rather than opening a new
/// one.
fn process_children(
    root: &mut Node,
    local: &mut Scope,
    call_stack: &mut Vec<String>,
    depth: usize,
    report: &mut Report,
) {
    collect_definitions(root, local, report);

    let mut i = 0;
    while i < root.children().len() {
        let step = match &root.children()[i] {
            Node::Element { tag, .. } => {
                if tagset::def_symbol(tag).is_some() {
                    Step::RemoveDefinition
                } else if tagset::is_reserved(tag) || tagset::is_native(tag) {
                    Step::Descend
                } else {
                    Step::Invoke(tag.clone())
                }
            }
            _ => Step::Skip,
        };

        match step {
            Step::Skip => i += 1,
            Step::RemoveDefinition => {
                // The definition lives on in the scope; the element never reaches the
                // output. The next sibling slides into this index.
                root.replace_child(i, Vec::new());
            }
            Step::Descend => {
                process_children(
                    &mut root.children_mut()[i],
                    local,
                    call_stack,
                    depth,
                    report,
                );
                i += 1;
            }
            Step::Invoke(tag) => {
                let expanded = match local.resolve(&tag) {
                    Some(definition) => expand_invocation(
                        &root.children()[i],
                        &tag,
                        definition,
                        local,
                        call_stack,
                        depth,
                        report,
                    ),
                    None => {
                        report.emit(Diagnostic::UnknownInvocation { tag });
                        None
                    }
                };

                match expanded {
                    Some(nodes) => {
                        // The results were fully expanded while they were built; the
                        // cursor jumps past them rather than re-scanning.
                        let inserted = nodes.len();
                        root.replace_child(i, nodes);
                        i += inserted;
                    }
                    None => {
                        // Unknown or aborted: the element stays, but its children still
                        // get a normal pass in this scope.
                        process_children(
                            &mut root.children_mut()[i],
                            local,
                            call_stack,
                            depth,
                            report,
                        );
                        i += 1;
                    }
                }
            }
        }
    }
}

/// Registers every direct-child definition element into the local scope, cloning it so the
/// definition outlives the element's removal from the tree. Invalid symbols and local
/// duplicates are reported and skipped (shadowing an outer scope is not a duplicate).
fn collect_definitions(root: &Node, scope: &mut Scope, report: &mut Report) {
    for child in root.children() {
        let Some(tag) = child.tag() else {
            continue;
        };
        let Some(symbol) = tagset::def_symbol(tag) else {
            continue;
        };
        if !tagset::is_valid_symbol(symbol) {
            report.emit(Diagnostic::InvalidDefinitionTag {
                tag: tag.to_string(),
            });
            continue;
        }
        if scope.get_local(symbol).is_some() {
            report.emit(Diagnostic::DuplicateDefinition {
                symbol: symbol.to_string(),
            });
            continue;
        }
        scope.insert(symbol, child.clone());
    }
}

/// Expands a single resolved invocation, returning the node sequence to splice in, or
/// `None` if expansion had to abort (cycle or depth ceiling), in which case the invocation
/// is left in the tree untouched.
fn expand_invocation(
    invocation: &Node,
    tag: &str,
    definition: &Node,
    caller_scope: &Scope,
    call_stack: &mut Vec<String>,
    depth: usize,
    report: &mut Report,
) -> Option<Vec<Node>> {
    if depth >= MAX_EXPANSION_DEPTH {
        report.emit(Diagnostic::DepthExceeded {
            tag: tag.to_string(),
        });
        return None;
    }
    if call_stack.iter().any(|frame| frame == tag) {
        report.emit(Diagnostic::RecursionCycle {
            tag: tag.to_string(),
        });
        return None;
    }

    let mut payload = SlotPayload::from_invocation(invocation);

    // One fresh clone of the definition body per expansion: the registered definition is
    // never mutated, and no node ends up under two parents.
    let mut synthetic = Node::Document {
        children: definition.children().to_vec(),
    };
    substitute(&mut synthetic, invocation, &mut payload, report);
    payload.warn_unused(tag, report);

    // The expansion sees the lexical scope of the *invocation*, not of the definition;
    // definitions inside the body are local to this expansion.
    call_stack.push(tag.to_string());
    process_scope(&mut synthetic, Some(caller_scope), call_stack, depth + 1, report);
    call_stack.pop();

    Some(synthetic.take_children())
}

/// The children of one invocation, bucketed for slot projection. Built once per invocation;
/// every node in here is already a clone.
struct SlotPayload {
    default_nodes: Vec<Node>,
    named: IndexMap<String, NamedSlot>,
}

struct NamedSlot {
    nodes: Vec<Node>,
    used: bool,
}

impl SlotPayload {
    /// Buckets the invocation's children: element children tagged `slot="name"` go to that
    /// named bucket, with the routing attribute stripped from the clone; everything else
    /// goes to the default bucket.
    fn from_invocation(invocation: &Node) -> Self {
        let mut payload = SlotPayload {
            default_nodes: Vec::new(),
            named: IndexMap::new(),
        };
        for child in invocation.children() {
            let mut clone = child.clone();
            let slot_name = clone
                .attr("slot")
                .filter(|name| !name.is_empty())
                .map(str::to_string);
            match slot_name {
                Some(name) => {
                    clone.remove_attr("slot");
                    payload
                        .named
                        .entry(name)
                        .or_insert_with(|| NamedSlot {
                            nodes: Vec::new(),
                            used: false,
                        })
                        .nodes
                        .push(clone);
                }
                None => payload.default_nodes.push(clone),
            }
        }
        payload
    }

    /// Looks up the bucket for a slot. Named lookups mark the bucket as consulted, which
    /// feeds the unused-slot warning afterwards; a named bucket nobody filled is `None`.
    fn lookup(&mut self, name: Option<&str>) -> Option<&[Node]> {
        match name {
            None => Some(self.default_nodes.as_slice()),
            Some(name) => self.named.get_mut(name).map(|slot| {
                slot.used = true;
                slot.nodes.as_slice()
            }),
        }
    }

    /// Warns about named buckets that carried content but were never consulted by any
    /// `<slot name="...">` in the definition body.
    fn warn_unused(&self, invocation_tag: &str, report: &mut Report) {
        for (name, slot) in &self.named {
            if !slot.used && !slot.nodes.is_empty() {
                report.emit(Diagnostic::UnknownNamedSlot {
                    name: name.clone(),
                    tag: invocation_tag.to_string(),
                });
            }
        }
    }
}

/// Walks a synthetic definition body, replacing `<prop>` elements with escaped text from
/// the invocation's attributes and `<slot>` elements with clones of the matching payload
/// bucket. Props and slots nest lexically through every other element, including nested
/// definitions (their bodies are substituted against this invocation before they are
/// collected).
fn substitute(node: &mut Node, invocation: &Node, payload: &mut SlotPayload, report: &mut Report) {
    enum Reserved {
        Prop,
        Slot,
        Other,
        Leaf,
    }

    let mut i = 0;
    while i < node.children().len() {
        let kind = match node.children()[i].tag() {
            Some("prop") => Reserved::Prop,
            Some("slot") => Reserved::Slot,
            Some(_) => Reserved::Other,
            None => Reserved::Leaf,
        };

        match kind {
            Reserved::Prop => {
                let value = prop_value(&node.children()[i], invocation, report);
                node.replace_child(i, vec![Node::Text(encode::text(&value))]);
                i += 1;
            }
            Reserved::Slot => {
                let name = node.children()[i]
                    .attr("name")
                    .filter(|name| !name.is_empty())
                    .map(str::to_string);
                let replacement = payload
                    .lookup(name.as_deref())
                    .map(|nodes| nodes.to_vec())
                    .unwrap_or_default();
                if replacement.is_empty() {
                    // Replaced by nothing; the next sibling slides into this index.
                    node.replace_child(i, Vec::new());
                } else {
                    let inserted = replacement.len();
                    node.replace_child(i, replacement);
                    i += inserted;
                }
            }
            Reserved::Other => {
                substitute(&mut node.children_mut()[i], invocation, payload, report);
                i += 1;
            }
            Reserved::Leaf => i += 1,
        }
    }
}

/// Resolves the value a `<prop>` substitutes to: the invocation's attribute if present,
/// else the prop's `default` attribute, else the empty string (with a diagnostic either for
/// the nameless prop or for the missing value).
fn prop_value(prop: &Node, invocation: &Node, report: &mut Report) -> String {
    let Some(name) = prop.attr("name").filter(|name| !name.is_empty()) else {
        report.emit(Diagnostic::MissingPropName);
        return String::new();
    };

    if let Some(value) = invocation.attr(name) {
        return value.to_string();
    }
    match prop.attr("default") {
        Some(default) => default.to_string(),
        None => {
            report.emit(Diagnostic::MissingPropValue {
                name: name.to_string(),
                tag: invocation.tag().unwrap_or("").to_string(),
            });
            String::new()
        }
    }
}
