use dom::{DomSnapshot, DomSnapshotOptions};
use html::parse_fragment;
use rstest::rstest;

fn snapshot(markup: &str) -> String {
    DomSnapshot::new(
        &parse_fragment(markup),
        DomSnapshotOptions {
            skip_whitespace_text: true,
            ..Default::default()
        },
    )
    .render()
}

#[rstest]
#[case::plain_text("hello", "#document-fragment\n  \"hello\"")]
#[case::entities(
    "<p title=\"a &amp; b\">x &lt; y</p>",
    "#document-fragment\n  <p title=\"a & b\">\n    \"x < y\""
)]
#[case::boolean_attribute(
    "<input disabled value=3>",
    "#document-fragment\n  <input disabled=\"\" value=\"3\">"
)]
#[case::inline_style_normalized(
    "<div style=\"color:red;  margin : 0\"></div>",
    "#document-fragment\n  <div style=\"color: red; margin: 0;\">"
)]
#[case::whitespace_between_blocks(
    "<section>\n  <h1>T</h1>\n</section>",
    "#document-fragment\n  <section>\n    <h1>\n      \"T\""
)]
fn parses_into_expected_tree(#[case] markup: &str, #[case] expected: &str) {
    assert_eq!(snapshot(markup), expected);
}

#[test]
fn parsed_nodes_are_live_and_detachable() {
    let frag = parse_fragment("<b>1</b><i>2</i>");
    let host = dom::create_element("div").unwrap();
    host.append_child(&frag).unwrap();
    assert!(!frag.has_child_nodes());
    assert_eq!(host.inner_html(), "<b>1</b><i>2</i>");
    host.first_child().unwrap().remove();
    assert_eq!(host.inner_html(), "<i>2</i>");
}
