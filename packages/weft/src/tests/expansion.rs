use super::*;
use pretty_assertions::assert_eq;

#[test]
fn definition_with_prop_and_default_slot() {
    let (out, report) = build(
        "<def-card><div class=\"card\"><h2><prop name=\"title\" default=\"Untitled\"/></h2><slot/></div></def-card><card title=\"Hi\"><p>body</p></card>",
    );
    assert_eq!(out, "<div class=\"card\"><h2>Hi</h2><p>body</p></div>");
    assert_eq!(report.errors(), 0);
    assert_eq!(report.warnings(), 0);
}

#[test]
fn prop_default_applies_when_attribute_is_absent() {
    let (out, report) = build(
        "<def-card><h2><prop name=\"title\" default=\"Untitled\"/></h2></def-card><card/>",
    );
    assert_eq!(out, "<h2>Untitled</h2>");
    assert_eq!(report.warnings(), 0);
}

#[test]
fn missing_prop_value_warns_and_substitutes_empty() {
    let (out, report) = build("<def-echo><p><prop name=\"x\"/></p></def-echo><echo/>");
    assert_eq!(out, "<p></p>");
    assert_eq!(report.warnings(), 1);
    assert_eq!(report.errors(), 0);
}

#[test]
fn empty_default_suppresses_the_missing_value_warning() {
    let (out, report) = build("<def-echo><p><prop name=\"x\" default=\"\"/></p></def-echo><echo/>");
    assert_eq!(out, "<p></p>");
    assert_eq!(report.warnings(), 0);
}

#[test]
fn nameless_prop_is_an_error() {
    let (out, report) = build("<def-e><p><prop/></p></def-e><e/>");
    assert_eq!(out, "<p></p>");
    assert_eq!(report.errors(), 1);
}

#[test]
fn prop_values_are_html_escaped() {
    let (out, report) = build("<def-echo><p><prop name=\"x\"/></p></def-echo><echo x=\"a<b&c>d\"/>");
    assert_eq!(out, "<p>a&lt;b&amp;c&gt;d</p>");
    assert_eq!(report.errors(), 0);
}

#[test]
fn prop_substitution_does_not_escape_quotes() {
    // Quotes only matter in the attribute context; substituted text leaves them alone
    let (out, _) = build("<def-echo><p><prop name=\"x\"/></p></def-echo><echo x='say \"hi\"'/>");
    assert_eq!(out, "<p>say \"hi\"</p>");
}

#[test]
fn named_and_default_slots_project_children() {
    let (out, report) = build(
        "<def-page><header><slot name=\"head\"/></header><main><slot/></main></def-page><page><h1 slot=\"head\">T</h1><p>b</p><span slot=\"side\">ignored</span></page>",
    );
    assert_eq!(out, "<header><h1>T</h1></header><main><p>b</p></main>");
    // The `side` bucket was provided but never consulted
    assert_eq!(report.warnings(), 1);
    assert_eq!(report.errors(), 0);
}

#[test]
fn unprovided_named_slot_projects_nothing() {
    let (out, report) = build(
        "<def-page><header><slot name=\"head\"/></header><slot/></def-page><page><p>b</p></page>",
    );
    assert_eq!(out, "<header></header><p>b</p>");
    assert_eq!(report.warnings(), 0);
}

#[test]
fn nested_invocation_inside_a_slot_payload_expands() {
    let (out, report) = build(
        "<def-inner><em><prop name=\"x\"/></em></def-inner><def-outer><div><slot/></div></def-outer><outer><inner x=\"1\"/></outer>",
    );
    assert_eq!(out, "<div><em>1</em></div>");
    assert_eq!(report.errors(), 0);
    assert_eq!(report.warnings(), 0);
}

#[test]
fn invocation_inside_a_definition_body_expands() {
    let (out, report) = build(
        "<def-icon><span class=\"icon\"></span></def-icon><def-btn><button><icon/><slot/></button></def-btn><btn>go</btn>",
    );
    assert_eq!(out, "<button><span class=\"icon\"></span>go</button>");
    assert_eq!(report.errors(), 0);
}

#[test]
fn unknown_invocation_is_preserved_with_a_warning() {
    let (out, report) = build("<my-widget foo=\"1\"><span>x</span></my-widget>");
    assert_eq!(out, "<my-widget foo=\"1\"><span>x</span></my-widget>");
    assert_eq!(report.warnings(), 1);
    assert_eq!(report.errors(), 0);
}

#[test]
fn recursion_cycle_is_detected() {
    let (out, report) = build("<def-r><r/></def-r><r/>");
    // The outer expansion aborts on the inner occurrence, which stays in the output
    assert_eq!(out, "<r></r>");
    assert_eq!(report.errors(), 1);
}

#[test]
fn mutual_recursion_is_detected() {
    let (out, report) = build(
        "<def-ping><pong/></def-ping><def-pong><ping/></def-pong><ping/>",
    );
    assert_eq!(out, "<ping></ping>");
    assert_eq!(report.errors(), 1);
}

#[test]
fn expansion_depth_is_capped() {
    // A 66-deep acyclic chain: c0 invokes c1 invokes c2 ... with no tag repeating, so only
    // the depth guard can stop it
    let mut src = String::new();
    for i in 0..65 {
        src.push_str(&format!("<def-c{i}><c{next}/></def-c{i}>", next = i + 1));
    }
    src.push_str("<def-c65>end</def-c65><c0/>");

    let (out, report) = build(&src);
    assert_eq!(out, "<c64></c64>");
    assert_eq!(report.errors(), 1);
}

#[test]
fn definitions_are_removed_from_output() {
    let (out, report) = build("<def-card><p>x</p></def-card>");
    assert_eq!(out, "");
    assert_eq!(report.errors(), 0);
    assert_eq!(report.warnings(), 0);
}

#[test]
fn invalid_definition_symbol_is_an_error_and_still_removed() {
    let (out, report) = build("<def-1bad><p>x</p></def-1bad>");
    assert_eq!(out, "");
    assert_eq!(report.errors(), 1);
}

#[test]
fn duplicate_definition_in_one_scope_is_an_error() {
    let (out, report) = build("<def-x><i></i></def-x><def-x><b></b></def-x><x/>");
    // The first definition wins; the second is discarded
    assert_eq!(out, "<i></i>");
    assert_eq!(report.errors(), 1);
}

#[test]
fn native_elements_share_the_enclosing_scope() {
    // A wrapper like `<div>` does not open a scope of its own, so the second `def-x`
    // collides with the outer one and the first definition wins everywhere
    let (out, report) = build(
        "<def-x><em>outer</em></def-x><div><def-x><strong>inner</strong></def-x><x/></div><x/>",
    );
    assert_eq!(out, "<div><em>outer</em></div><em>outer</em>");
    assert_eq!(report.errors(), 1);
    assert_eq!(report.warnings(), 0);
}

#[test]
fn definitions_inside_a_body_are_local_to_the_expansion() {
    let (out, report) = build(
        "<def-x><em>outer</em></def-x><def-w><def-x><strong>inner</strong></def-x><x/></def-w><w/><x/>",
    );
    assert_eq!(out, "<strong>inner</strong><em>outer</em>");
    assert_eq!(report.errors(), 0);
}

#[test]
fn expansion_sees_the_invocation_scope() {
    // `w` is defined at the top level but invoked inside `host`'s body, where `x` is
    // shadowed; its expansion resolves `x` through the invocation's scope chain, not the
    // definition site's
    let (out, report) = build(
        "<def-x><em>outer</em></def-x><def-w><x/></def-w><def-host><def-x><strong>inner</strong></def-x><w/></def-host><host/>",
    );
    assert_eq!(out, "<strong>inner</strong>");
    assert_eq!(report.errors(), 0);
    assert_eq!(report.warnings(), 0);
}

#[test]
fn reserved_elements_outside_definitions_are_untouched() {
    let (out, report) = build("<slot name=\"x\"></slot><prop name=\"y\"></prop>");
    assert_eq!(out, "<slot name=\"x\"></slot><prop name=\"y\"></prop>");
    assert_eq!(report.errors(), 0);
    assert_eq!(report.warnings(), 0);
}

#[test]
fn definition_survives_repeated_invocation() {
    let (out, report) = build(
        "<def-tag><li><prop name=\"v\"/></li></def-tag><tag v=\"1\"/><tag v=\"2\"/><tag v=\"3\"/>",
    );
    assert_eq!(out, "<li>1</li><li>2</li><li>3</li>");
    assert_eq!(report.errors(), 0);
}

#[test]
fn definitions_apply_to_earlier_siblings() {
    // Collection happens before the per-child walk, so source order between a definition
    // and its invocations doesn't matter within one scope
    let (out, report) = build("<x/><def-x><p>v</p></def-x>");
    assert_eq!(out, "<p>v</p>");
    assert_eq!(report.errors(), 0);
    assert_eq!(report.warnings(), 0);
}

#[test]
fn spliced_results_are_not_reprocessed() {
    // The unknown element inside the body is warned about exactly once, while the synthetic
    // root is processed; the spliced result is never re-scanned at the insertion level
    let (out, report) = build("<def-wrap><widget/></def-wrap><wrap/>");
    assert_eq!(out, "<widget></widget>");
    assert_eq!(report.warnings(), 1);
    assert_eq!(report.errors(), 0);
}

#[test]
fn multiple_children_splice_in_order() {
    let (out, _) = build(
        "<def-pair><dt><prop name=\"k\"/></dt><dd><slot/></dd></def-pair><dl><pair k=\"a\">1</pair><pair k=\"b\">2</pair></dl>",
    );
    assert_eq!(out, "<dl><dt>a</dt><dd>1</dd><dt>b</dt><dd>2</dd></dl>");
}

#[test]
fn slot_attribute_is_stripped_from_projected_children() {
    let (out, _) = build(
        "<def-page><aside><slot name=\"side\"/></aside></def-page><page><p slot=\"side\" class=\"note\">n</p></page>",
    );
    assert_eq!(out, "<aside><p class=\"note\">n</p></aside>");
}

#[test]
fn text_children_always_join_the_default_slot() {
    let (out, _) = build("<def-quote><blockquote><slot/></blockquote></def-quote><quote>plain words</quote>");
    assert_eq!(out, "<blockquote>plain words</blockquote>");
}
