use super::*;
use pretty_assertions::assert_eq;

#[test]
fn attribute_values_are_escaped_for_the_quoted_context() {
    let mut div = Node::element("div");
    div.push_attr("title", "a \"quote\" & <tag>");
    assert_eq!(
        to_html(&div),
        "<div title=\"a &quot;quote&quot; &amp; &lt;tag&gt;\"></div>"
    );
}

#[test]
fn text_is_written_verbatim() {
    // Stored text is never re-escaped; the parser put it there byte-exact
    let mut p = Node::element("p");
    p.push_child(Node::text("already &amp; encoded < raw"));
    assert_eq!(to_html(&p), "<p>already &amp; encoded < raw</p>");
}

#[test]
fn void_elements_close_immediately() {
    let mut br = Node::element("br");
    // Children on a void element are silently dropped
    br.push_child(Node::text("lost"));
    assert_eq!(to_html(&br), "<br>");

    let mut img = Node::element("img");
    img.push_attr("src", "a.png");
    assert_eq!(to_html(&img), "<img src=\"a.png\">");
}

#[test]
fn comments_and_declarations_carry_their_delimiters() {
    assert_eq!(to_html(&Node::Comment(" note ".to_string())), "<!-- note -->");
    assert_eq!(
        to_html(&Node::Declaration("doctype html".to_string())),
        "<!doctype html>"
    );
}

#[test]
fn document_children_serialize_in_order() {
    let mut doc = Node::document();
    doc.push_child(Node::Declaration("doctype html".to_string()));
    doc.push_child(Node::element("main"));
    doc.push_child(Node::text("tail"));
    assert_eq!(to_html(&doc), "<!doctype html><main></main>tail");
}

#[test]
fn attribute_order_is_preserved() {
    let mut a = Node::element("a");
    a.push_attr("href", "/x");
    a.push_attr("rel", "nofollow");
    a.push_attr("id", "first");
    assert_eq!(
        to_html(&a),
        "<a href=\"/x\" rel=\"nofollow\" id=\"first\"></a>"
    );
}

#[test]
fn replace_child_splices_in_place() {
    let mut doc = Node::document();
    doc.push_child(Node::text("a"));
    doc.push_child(Node::text("b"));
    doc.push_child(Node::text("c"));

    doc.replace_child(1, vec![Node::text("1"), Node::text("2")]);
    assert_eq!(to_html(&doc), "a12c");

    doc.replace_child(0, Vec::new());
    assert_eq!(to_html(&doc), "12c");

    // Out-of-range splices are ignored
    doc.replace_child(10, vec![Node::text("x")]);
    assert_eq!(to_html(&doc), "12c");
}
