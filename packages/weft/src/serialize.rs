//! The write-back half of the round trip: converting a document tree into HTML text in a
//! stable depth-first order.

use crate::{encode, tagset, Node};

/// Serialises a node tree to HTML. Text, comment, and declaration bytes are written
/// verbatim (nothing is re-escaped); attribute values are re-quoted with double quotes and
/// escaped for that context. Void elements emit no children and no close tag, silently
/// dropping any children they somehow acquired.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Document { children } => {
            for child in children {
                write_node(out, child);
            }
        }
        Node::Text(text) => out.push_str(text),
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::Declaration(text) => {
            out.push_str("<!");
            out.push_str(text);
            out.push('>');
        }
        Node::Element {
            tag,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&encode::attribute(&attr.value));
                out.push('"');
            }
            out.push('>');

            if !tagset::is_void(tag) {
                for child in children {
                    write_node(out, child);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}
