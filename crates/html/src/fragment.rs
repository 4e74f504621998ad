use crate::tokenizer::{Token, tokenize};
use dom::{Namespace, NodeRef, create_comment, create_document_fragment, create_element_ns, create_text_node};

/// Options for [`parse_fragment_with`].
#[derive(Clone, Copy, Debug)]
pub struct ParseConfig {
    /// Keep `<!-- -->` comments as comment nodes.
    pub keep_comments: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            keep_comments: true,
        }
    }
}

/// Parses `markup` into a fresh `DocumentFragment` holding what a document
/// body would contain.
pub fn parse_fragment(markup: &str) -> NodeRef {
    parse_fragment_with(markup, &ParseConfig::default())
}

/// Same as [`parse_fragment`] with explicit options.
///
/// Tree construction is a stack of open elements:
/// - `html`, `head` and `body` tags are transparent: their content lands in
///   the fragment and their attributes are dropped;
/// - an end tag closes up to the nearest open element with that name and is
///   ignored when none is open;
/// - elements inside `<svg>` are created in the SVG namespace, except below
///   `foreignObject`;
/// - doctypes are dropped.
pub fn parse_fragment_with(markup: &str, config: &ParseConfig) -> NodeRef {
    let root = create_document_fragment();
    let mut open: Vec<OpenElement> = Vec::new();

    for token in tokenize(markup) {
        let parent = open.last().map_or(&root, |e| &e.node);
        match token {
            Token::Doctype(_) => {}
            Token::Comment(text) => {
                if config.keep_comments {
                    attach(parent, &create_comment(&text));
                }
            }
            Token::Text(text) => attach(parent, &create_text_node(&text)),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let lower = name.to_ascii_lowercase();
                if matches!(lower.as_str(), "html" | "head" | "body") {
                    continue;
                }
                let namespace = namespace_for(&lower, open.last());
                let node = match create_element_ns(namespace, &name) {
                    Ok(node) => node,
                    Err(err) => {
                        log::debug!(target: "html.fragment", "skipping <{name}>: {err}");
                        continue;
                    }
                };
                for (attr, value) in attributes {
                    if let Err(err) = node.set_attribute(&attr, value.as_deref().unwrap_or("")) {
                        log::debug!(target: "html.fragment", "skipping attribute {attr:?} on <{name}>: {err}");
                    }
                }
                attach(parent, &node);
                if !self_closing {
                    open.push(OpenElement {
                        node,
                        name: lower,
                        namespace,
                    });
                }
            }
            Token::EndTag(name) => {
                if let Some(pos) = open.iter().rposition(|e| e.name == name) {
                    open.truncate(pos);
                } else {
                    log::trace!(target: "html.fragment", "ignoring stray </{name}>");
                }
            }
        }
    }
    log::trace!(target: "html.fragment", "parsed {} top-level nodes", root.child_count());
    root
}

struct OpenElement {
    node: NodeRef,
    /// Lowercased local name, matched against end tags.
    name: String,
    namespace: Namespace,
}

fn namespace_for(lower_name: &str, parent: Option<&OpenElement>) -> Namespace {
    if lower_name == "svg" {
        return Namespace::Svg;
    }
    match parent {
        Some(p) if p.namespace == Namespace::Svg && p.name != "foreignobject" => Namespace::Svg,
        _ => Namespace::Html,
    }
}

fn attach(parent: &NodeRef, child: &NodeRef) {
    // Fresh nodes under element or fragment parents always satisfy the
    // hierarchy checks.
    if let Err(err) = parent.append_child(child) {
        log::debug!(target: "html.fragment", "append failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::NodeType;

    #[test]
    fn builds_nested_elements_in_order() {
        let frag = parse_fragment("<ul id=\"list\"><li>one</li><li>two</li></ul><p>after</p>");
        assert_eq!(frag.node_type(), NodeType::DocumentFragment);
        assert_eq!(frag.child_count(), 2);
        let ul = frag.first_child().unwrap();
        assert_eq!(ul.id(), "list");
        assert_eq!(ul.child_count(), 2);
        assert_eq!(ul.text_content(), "onetwo");
        assert_eq!(frag.last_child().unwrap().text_content(), "after");
    }

    #[test]
    fn document_wrappers_are_transparent() {
        let frag = parse_fragment(
            "<!DOCTYPE html><html><head></head><body class=\"x\"><main>hi</main></body></html>",
        );
        assert_eq!(frag.child_count(), 1);
        assert_eq!(frag.first_child().unwrap().local_name().as_deref(), Some("main"));
    }

    #[test]
    fn unclosed_and_stray_tags() {
        let frag = parse_fragment("<div><span>a</div></em>b");
        assert_eq!(frag.outer_html(), "<div><span>a</span></div>b");
    }

    #[test]
    fn svg_subtree_uses_svg_namespace() {
        let frag = parse_fragment(
            "<svg viewBox=\"0 0 10 10\"><linearGradient id=\"g\"/><foreignObject><p>x</p></foreignObject></svg>",
        );
        let svg = frag.first_child().unwrap();
        assert_eq!(svg.namespace(), Some(Namespace::Svg));
        assert_eq!(svg.get_attribute("viewBox").as_deref(), Some("0 0 10 10"));
        let gradient = svg.first_child().unwrap();
        assert_eq!(gradient.tag_name().as_deref(), Some("linearGradient"));
        let p = svg.last_child().unwrap().first_child().unwrap();
        assert_eq!(p.namespace(), Some(Namespace::Html));
    }

    #[test]
    fn comments_follow_config() {
        let markup = "<p>a<!-- c -->b</p>";
        assert_eq!(parse_fragment(markup).first_child().unwrap().child_count(), 3);
        let stripped = parse_fragment_with(
            markup,
            &ParseConfig {
                keep_comments: false,
            },
        );
        assert_eq!(stripped.first_child().unwrap().child_count(), 2);
    }

    #[test]
    fn empty_markup_yields_empty_fragment() {
        assert!(!parse_fragment("").has_child_nodes());
    }

    #[test]
    fn invalid_attribute_names_are_skipped() {
        let frag = parse_fragment("<p 1bad=\"x\" ok=\"y\"></p>");
        let p = frag.first_child().unwrap();
        assert_eq!(p.attributes(), vec![("ok".to_string(), "y".to_string())]);
    }
}
