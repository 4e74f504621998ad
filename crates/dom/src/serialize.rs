use crate::node::{NodeKind, NodeRef};

fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_raw_text_element(name: &str) -> bool {
    matches!(name, "script" | "style")
}

fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn write_node(out: &mut String, node: &NodeRef, raw_parent: bool) {
    match &node.data().kind {
        NodeKind::Text(t) => {
            if raw_parent {
                out.push_str(t);
            } else {
                escape_text(out, t);
            }
        }
        NodeKind::Comment(t) => {
            out.push_str("<!--");
            out.push_str(t);
            out.push_str("-->");
        }
        NodeKind::Document | NodeKind::Fragment => write_children(out, node, false),
        NodeKind::Element(el) => {
            out.push('<');
            out.push_str(&el.local_name);
            for (k, v) in node.attributes() {
                out.push(' ');
                out.push_str(&k);
                out.push_str("=\"");
                escape_attr(out, &v);
                out.push('"');
            }
            out.push('>');
            if is_void_element(&el.local_name) && node.data().children.is_empty() {
                return;
            }
            write_children(out, node, is_raw_text_element(&el.local_name));
            out.push_str("</");
            out.push_str(&el.local_name);
            out.push('>');
        }
    }
}

fn write_children(out: &mut String, node: &NodeRef, raw: bool) {
    for c in node.data().children.iter() {
        write_node(out, c, raw);
    }
}

impl NodeRef {
    /// Markup for the node itself and its subtree.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        write_node(&mut out, self, false);
        out
    }

    /// Markup for the children only.
    pub fn inner_html(&self) -> String {
        let raw = self
            .local_name()
            .is_some_and(|n| is_raw_text_element(&n));
        let mut out = String::new();
        write_children(&mut out, self, raw);
        out
    }
}
