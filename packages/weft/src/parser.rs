//! The core parsing logic that converts raw HTML text into a document tree. The grammar is
//! deliberately permissive: anything malformed is recovered from locally (stray `<`
//! characters become text, unmatched close tags are shed, unterminated comments and raw-text
//! runs consume to end-of-input) and the number of forced recoveries is reported once per
//! file as an aggregated warning.

use crate::error::Diagnostic;
use crate::{tagset, Attribute, Node, Report};
use memchr::memchr;

/// Parses a file's contents into a document tree. This never fails; see the module docs for
/// the recovery behaviour. Tag and attribute names are normalised to ASCII lowercase, while
/// text content and attribute values are preserved byte-exact (no character-reference
/// decoding).
pub fn parse_html(src: &str, report: &mut Report) -> Node {
    let mut parser = Parser {
        src,
        pos: 0,
        recoveries: 0,
    };
    let mut children = Vec::new();
    parser.parse_nodes(&mut children, None);

    if parser.recoveries > 0 {
        report.emit(Diagnostic::ParseRecovery {
            regions: parser.recoveries,
        });
    }
    Node::Document { children }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    recoveries: usize,
}

impl<'a> Parser<'a> {
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }
    fn eof(&self) -> bool {
        self.pos >= self.src.len()
    }
    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }
    /// Whether the input at the cursor starts with the given literal. Byte-wise, so it is
    /// safe regardless of where the cursor sits inside multi-byte content.
    fn at(&self, literal: &str) -> bool {
        self.bytes()[self.pos..].starts_with(literal.as_bytes())
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Reads a tag or attribute name (letter/`_`/`:` head, then letters, digits, `-`, `_`,
    /// `:`, `.`), lowercased. Returns `None` without moving the cursor if it isn't at a
    /// name-start character.
    fn read_name(&mut self) -> Option<String> {
        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b':' => self.pos += 1,
            _ => return None,
        }
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.') {
                self.pos += 1;
            } else {
                break;
            }
        }
        Some(self.src[start..self.pos].to_ascii_lowercase())
    }

    /// Reads an attribute value: quoted (single or double, running to the matching quote or
    /// end-of-input) or unquoted (running to whitespace, `>`, or `/`).
    fn read_attr_value(&mut self) -> String {
        self.skip_whitespace();
        match self.peek() {
            None => String::new(),
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                let end = memchr(quote, &self.bytes()[start..])
                    .map(|offset| start + offset)
                    .unwrap_or(self.src.len());
                let value = self.src[start..end].to_string();
                self.pos = end;
                if self.peek() == Some(quote) {
                    self.pos += 1;
                }
                value
            }
            Some(_) => {
                let start = self.pos;
                while let Some(b) = self.peek() {
                    if b.is_ascii_whitespace() || b == b'>' || b == b'/' {
                        break;
                    }
                    self.pos += 1;
                }
                self.src[start..self.pos].to_string()
            }
        }
    }

    /// Case-insensitive (ASCII) search for `needle` at or after `from`.
    fn find_ci(&self, needle: &str, from: usize) -> Option<usize> {
        let haystack = self.bytes();
        let needle = needle.as_bytes();
        let last_start = haystack.len().checked_sub(needle.len())?;
        (from..=last_start).find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
    }

    /// Parses a run of sibling nodes into `children` until end-of-input or, when
    /// `closing_tag` is given, until that close tag is consumed.
    fn parse_nodes(&mut self, children: &mut Vec<Node>, closing_tag: Option<&str>) {
        while !self.eof() {
            if let Some(expected) = closing_tag {
                if self.at("</") {
                    let save = self.pos;
                    let name = self.parse_close_tag();
                    if name.as_deref() == Some(expected) {
                        return;
                    }
                    // Somebody else's close tag. Rewind, shed a literal `<`, and let the
                    // next pass re-scan the rest of it as content.
                    self.pos = save;
                    children.push(Node::text("<"));
                    self.pos += 1;
                    continue;
                }
            }

            if self.at("<!--") {
                self.parse_comment(children);
            } else if self.at("<!") {
                self.parse_declaration(children);
            } else if self.at("</") {
                // A stray close tag with nothing open: consume and discard.
                self.parse_close_tag();
            } else if self.at("<") {
                self.parse_start_tag(children);
            } else {
                self.parse_text(children);
            }
        }
    }

    /// Consumes `</name ... >` and returns the lowercased name, or `None` if there wasn't
    /// one. Everything up to and including the `>` is consumed either way.
    fn parse_close_tag(&mut self) -> Option<String> {
        if !self.at("</") {
            return None;
        }
        self.pos += 2;
        self.skip_whitespace();
        let name = self.read_name();
        while let Some(b) = self.peek() {
            self.pos += 1;
            if b == b'>' {
                break;
            }
        }
        name
    }

    fn parse_comment(&mut self, children: &mut Vec<Node>) {
        self.pos += 4;
        let start = self.pos;
        match self.find_ci("-->", start) {
            Some(end) => {
                children.push(Node::Comment(self.src[start..end].to_string()));
                self.pos = end + 3;
            }
            None => {
                children.push(Node::Comment(self.src[start..].to_string()));
                self.pos = self.src.len();
                self.recoveries += 1;
            }
        }
    }

    fn parse_declaration(&mut self, children: &mut Vec<Node>) {
        self.pos += 2;
        let start = self.pos;
        let end = memchr(b'>', &self.bytes()[start..])
            .map(|offset| start + offset)
            .unwrap_or(self.src.len());
        children.push(Node::Declaration(self.src[start..end].to_string()));
        self.pos = end;
        if self.peek() == Some(b'>') {
            self.pos += 1;
        }
    }

    fn parse_text(&mut self, children: &mut Vec<Node>) {
        let start = self.pos;
        let end = memchr(b'<', &self.bytes()[start..])
            .map(|offset| start + offset)
            .unwrap_or(self.src.len());
        if end > start {
            children.push(Node::text(&self.src[start..end]));
        }
        self.pos = end;
    }

    /// Consumes the opaque content of a raw-text element (`script`/`style`) up to, but not
    /// including, its case-insensitive close tag. The close tag itself is consumed by the
    /// regular close-tag path afterwards.
    fn parse_raw_text(&mut self, children: &mut Vec<Node>, tag: &str) {
        let closing = format!("</{tag}");
        match self.find_ci(&closing, self.pos) {
            Some(end) => {
                if end > self.pos {
                    children.push(Node::text(&self.src[self.pos..end]));
                }
                self.pos = end;
            }
            None => {
                children.push(Node::text(&self.src[self.pos..]));
                self.pos = self.src.len();
                self.recoveries += 1;
            }
        }
    }

    fn parse_start_tag(&mut self, children: &mut Vec<Node>) {
        self.pos += 1;
        let Some(tag) = self.read_name() else {
            // `<` followed by nothing tag-like: emit it literally and move on one byte.
            children.push(Node::text("<"));
            return;
        };

        let mut attrs: Vec<Attribute> = Vec::new();
        let mut self_closing = false;
        while !self.eof() {
            self.skip_whitespace();
            if self.at("/>") {
                self_closing = true;
                self.pos += 2;
                break;
            }
            if self.peek() == Some(b'>') {
                self.pos += 1;
                break;
            }

            let Some(name) = self.read_name() else {
                // Junk where an attribute name should be; step over it.
                if self.eof() {
                    break;
                }
                self.pos += 1;
                continue;
            };
            self.skip_whitespace();
            let value = if self.peek() == Some(b'=') {
                self.pos += 1;
                self.read_attr_value()
            } else {
                String::new()
            };
            // Duplicates are recorded as written; lookup only ever sees the first.
            attrs.push(Attribute { name, value });
        }

        let mut elem_children = Vec::new();
        if !self_closing && !tagset::is_void(&tag) {
            if tagset::is_raw_text(&tag) {
                self.parse_raw_text(&mut elem_children, &tag);
            }
            self.parse_nodes(&mut elem_children, Some(tag.as_str()));
        }

        children.push(Node::Element {
            tag,
            attrs,
            children: elem_children,
        });
    }
}
