use crate::expand::MAX_EXPANSION_DEPTH;
use thiserror::Error;

/// How serious a diagnostic is. Errors make the build fail once it completes; warnings are
/// reported and counted but never change the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Diagnostics that can be raised while parsing or expanding a document. None of these abort
/// processing: the engine recovers locally, leaves the offending node in a well-defined
/// state, and keeps going. They are values rather than control flow, routed through a
/// [`Report`](crate::Report) which counts them and decides the final exit status.
#[derive(Debug, Error)]
pub enum Diagnostic {
    /// Aggregated once per file, after parsing, if any forced recoveries happened
    /// (unterminated comments or raw-text sections).
    #[error("parser recovered from {regions} malformed HTML region(s)")]
    ParseRecovery { regions: usize },

    /// A `def-` tag whose suffix fails the symbol grammar (ASCII letter, then letters,
    /// digits, or `-`). The element is still removed from the output.
    #[error("invalid component definition tag <{tag}>")]
    InvalidDefinitionTag { tag: String },
    /// Two definitions of the same symbol in one scope. Shadowing an *outer* scope is fine;
    /// this fires only for local collisions, and the later definition is discarded.
    #[error("duplicate component definition for symbol '{symbol}' in same scope")]
    DuplicateDefinition { symbol: String },
    /// A non-native tag with no definition anywhere in the scope chain. The element is left
    /// untouched in the output.
    #[error("unknown invocation symbol <{tag}>; leaving unchanged")]
    UnknownInvocation { tag: String },

    /// A `<prop>` inside a definition body with no `name` attribute. It substitutes to an
    /// empty text node.
    #[error("<prop> missing required name attribute")]
    MissingPropName,
    /// The invocation supplied no value for a prop that also has no `default` attribute.
    #[error("missing prop '{name}' on <{tag}>")]
    MissingPropValue { name: String, tag: String },
    /// The invocation tagged children with `slot="..."` for a slot the definition never
    /// consults.
    #[error("unknown named slot '{name}' provided to <{tag}>")]
    UnknownNamedSlot { name: String, tag: String },

    /// An invocation whose tag is already being expanded further up the call stack.
    #[error("recursive component cycle detected at <{tag}>")]
    RecursionCycle { tag: String },
    /// Expansion nesting reached [`MAX_EXPANSION_DEPTH`].
    #[error("max expansion depth ({}) exceeded while expanding <{}>", MAX_EXPANSION_DEPTH, .tag)]
    DepthExceeded { tag: String },
}

impl Diagnostic {
    /// The severity this diagnostic is reported at. This is fixed per kind; there are no
    /// promotable warnings.
    pub fn severity(&self) -> Severity {
        match self {
            Self::ParseRecovery { .. }
            | Self::UnknownInvocation { .. }
            | Self::MissingPropValue { .. }
            | Self::UnknownNamedSlot { .. } => Severity::Warning,
            Self::InvalidDefinitionTag { .. }
            | Self::DuplicateDefinition { .. }
            | Self::MissingPropName
            | Self::RecursionCycle { .. }
            | Self::DepthExceeded { .. } => Severity::Error,
        }
    }
}
