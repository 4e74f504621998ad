use crate::children::{Child, Children, append_children};
use crate::error::BuildError;
use dom::{NodeRef, create_document_fragment};

/// Batches `children` into a `DocumentFragment`; empty entries are skipped.
/// Appending the fragment somewhere moves its children there.
pub fn fragment(children: Vec<Child>) -> Result<NodeRef, BuildError> {
    let frag = create_document_fragment();
    append_children(&frag, Children::Many(children))?;
    Ok(frag)
}

/// Parses `markup` into a fragment holding what a document body would.
pub fn from_html_string(markup: &str) -> NodeRef {
    html::parse_fragment(markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::create_element;

    #[test]
    fn fragment_moves_into_parent() {
        let span = create_element("span").unwrap();
        let frag = fragment(vec!["a".into(), Child::Empty, (&span).into()]).unwrap();
        assert_eq!(frag.child_count(), 2);

        let host = create_element("div").unwrap();
        host.append_child(&frag).unwrap();
        assert_eq!(host.child_count(), 2);
        assert!(!frag.has_child_nodes());
        assert!(span.parent().unwrap().ptr_eq(&host));
    }

    #[test]
    fn html_string_becomes_live_nodes() {
        let frag = from_html_string("<div>Title</div><p>Para</p>");
        assert_eq!(frag.child_count(), 2);
        assert_eq!(frag.first_child().unwrap().text_content(), "Title");
        assert!(!from_html_string("").has_child_nodes());
    }
}
