//! Static classification of lowercased tag names. The native set decides whether an unknown
//! tag is a candidate component invocation; the void and raw-text sets drive parsing and
//! serialisation; `prop`/`slot` are reserved for substitution inside definition bodies.

/// The closed set of HTML and common SVG element names that are never treated as component
/// invocations. `slot` appears here *and* as a reserved name: outside a definition body it
/// is an ordinary native element.
const NATIVE_TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi",
    "bdo", "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code",
    "col", "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog",
    "div", "dl", "dt", "em", "embed", "fieldset", "figcaption", "figure", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr",
    "html", "i", "iframe", "img", "input", "ins", "kbd", "label", "legend", "li",
    "link", "main", "map", "mark", "menu", "meta", "meter", "nav", "noscript", "object",
    "ol", "optgroup", "option", "output", "p", "param", "picture", "pre", "progress",
    "q", "rp", "rt", "ruby", "s", "samp", "script", "search", "section", "select",
    "slot", "small", "source", "span", "strong", "style", "sub", "summary", "sup", "table",
    "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time", "title", "tr",
    "track", "u", "ul", "var", "video", "wbr", "svg", "path", "g", "defs", "use", "circle",
    "ellipse", "line", "polygon", "polyline", "rect", "text", "lineargradient",
    "radialgradient", "stop", "symbol", "view", "clippath", "filter", "mask", "foreignobject",
];

/// Elements that never have children or a close tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Whether the tag is in the fixed native HTML/SVG set.
pub fn is_native(tag: &str) -> bool {
    NATIVE_TAGS.contains(&tag)
}

/// Whether the tag is a void element (serialised without a close tag, parsed childless).
pub fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Whether the tag's content is tokenized as a single opaque text run up to its close tag.
pub fn is_raw_text(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

/// Whether the tag is an engine keyword handled specially inside definition bodies.
pub fn is_reserved(tag: &str) -> bool {
    matches!(tag, "prop" | "slot")
}

/// Peels the component symbol out of a definition tag: `def-card` yields `card`. Returns
/// `None` for anything that isn't a `def-` tag with a non-empty suffix. The suffix is *not*
/// validated here; see [`is_valid_symbol`].
pub fn def_symbol(tag: &str) -> Option<&str> {
    tag.strip_prefix("def-").filter(|symbol| !symbol.is_empty())
}

/// Whether a definition suffix is a legal component symbol: an ASCII letter followed by
/// ASCII letters, digits, or `-`.
pub fn is_valid_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}
