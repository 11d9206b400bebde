mod expansion;
mod serialize;

pub use super::*;

/// Parses a source string, expands it fully, and serialises the result, returning the
/// output alongside the report so tests can assert on diagnostic counts.
pub fn build(src: &str) -> (String, Report) {
    let mut report = Report::new();
    let mut document = parse_html(src, &mut report);
    expand_document(&mut document, &mut report);
    (to_html(&document), report)
}

/// Parses a source string without expanding, for parser-only assertions.
pub fn parse(src: &str) -> (Node, Report) {
    let mut report = Report::new();
    let document = parse_html(src, &mut report);
    (document, report)
}

/// Asserts that parsing and re-serialising the given source is byte-stable.
pub fn assert_roundtrip(src: &str) {
    let (document, report) = parse(src);
    assert_eq!(to_html(&document), src);
    assert_eq!(report.warnings(), 0);
    assert_eq!(report.errors(), 0);
}
