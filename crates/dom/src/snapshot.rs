use crate::node::{NodeKind, NodeRef};
use std::fmt;

/// Deterministic, indented rendering of a subtree for tests and debugging.
/// Not a stable format.
///
/// Rules:
/// - One line per node, two spaces of indent per depth level.
/// - Attributes are printed in insertion order; inline style comes last.
/// - Text is printed quoted with `"` and `\` escaped.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomSnapshotOptions {
    /// Append `[on: click x2, input]` to elements with listeners.
    pub include_listeners: bool,
    /// Drop text nodes that are entirely whitespace.
    pub skip_whitespace_text: bool,
}

#[derive(Debug)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(root: &NodeRef, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, &options, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

fn walk_snapshot(node: &NodeRef, options: &DomSnapshotOptions, depth: usize, out: &mut Vec<String>) {
    if options.skip_whitespace_text
        && node
            .data_text()
            .is_some_and(|t| node.is_text() && t.trim().is_empty())
    {
        return;
    }
    const INDENT_STEP: usize = 2;
    let mut line = " ".repeat(depth * INDENT_STEP);
    write_node_line(&mut line, node, options);
    out.push(line);
    for child in node.children() {
        walk_snapshot(&child, options, depth + 1, out);
    }
}

fn write_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
}

fn write_node_line(out: &mut String, node: &NodeRef, options: &DomSnapshotOptions) {
    match &node.data().kind {
        NodeKind::Document => out.push_str("#document"),
        NodeKind::Fragment => out.push_str("#document-fragment"),
        NodeKind::Text(t) => {
            out.push('"');
            write_escaped(out, t);
            out.push('"');
        }
        NodeKind::Comment(t) => {
            out.push_str("<!-- ");
            write_escaped(out, t);
            out.push_str(" -->");
        }
        NodeKind::Element(el) => {
            out.push('<');
            out.push_str(&el.local_name);
            for (k, v) in node.attributes() {
                out.push(' ');
                out.push_str(&k);
                out.push_str("=\"");
                write_escaped(out, &v);
                out.push('"');
            }
            out.push('>');
            if options.include_listeners && !el.listeners.is_empty() {
                let mut counts: Vec<(&str, usize)> = Vec::new();
                for (t, _) in &el.listeners {
                    match counts.iter_mut().find(|(name, _)| name == t) {
                        Some((_, n)) => *n += 1,
                        None => counts.push((t, 1)),
                    }
                }
                let rendered: Vec<String> = counts
                    .into_iter()
                    .map(|(t, n)| if n == 1 { t.to_string() } else { format!("{t} x{n}") })
                    .collect();
                out.push_str(" [on: ");
                out.push_str(&rendered.join(", "));
                out.push(']');
            }
        }
    }
}

/// Compact one-line-per-node outline, capped at `cap` nodes. Long text is
/// cut at 40 characters and whitespace-only text is omitted.
pub fn outline(root: &NodeRef, cap: usize) -> Vec<String> {
    fn walk(node: &NodeRef, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = "  ".repeat(depth);
        match node.node_type() {
            crate::NodeType::Text => {
                let t = node.text_content().replace('\n', " ").trim().to_string();
                if !t.is_empty() {
                    let show = if t.chars().count() > 40 {
                        format!("{}…", t.chars().take(40).collect::<String>())
                    } else {
                        t
                    };
                    out.push(format!("{indent}\"{show}\""));
                }
            }
            crate::NodeType::Element => {
                let mut line = format!("{indent}<{}", node.local_name().unwrap_or_default());
                let id = node.id();
                if !id.is_empty() {
                    line.push_str(&format!(r#" id="{id}""#));
                }
                let class = node.class_name();
                if !class.is_empty() {
                    line.push_str(&format!(r#" class="{class}""#));
                }
                line.push('>');
                let style: Vec<String> = node
                    .style()
                    .entries()
                    .into_iter()
                    .take(3)
                    .map(|(k, v)| format!("{k}: {v};"))
                    .collect();
                if !style.is_empty() {
                    line.push_str(&format!("  /* {} */", style.join(" ")));
                }
                out.push(line);
            }
            _ => out.push(format!("{indent}{}", node.node_name())),
        }
        for c in node.children() {
            walk(&c, depth + 1, out, left);
        }
    }
    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{create_document_fragment, create_element, create_text_node};
    use crate::event::EventHandler;

    #[test]
    fn snapshot_renders_tree() {
        let frag = create_document_fragment();
        let div = create_element("div").unwrap();
        div.set_attribute("id", "x").unwrap();
        div.append_child(&create_text_node("say \"hi\"")).unwrap();
        div.add_event_listener("click", EventHandler::new(|_| {}));
        div.add_event_listener("click", EventHandler::new(|_| {}));
        frag.append_child(&div).unwrap();
        frag.append_child(&create_text_node("  ")).unwrap();

        let snap = DomSnapshot::new(
            &frag,
            DomSnapshotOptions {
                include_listeners: true,
                skip_whitespace_text: true,
            },
        );
        assert_eq!(
            snap.render(),
            "#document-fragment\n  <div id=\"x\"> [on: click x2]\n    \"say \\\"hi\\\"\""
        );
    }

    #[test]
    fn outline_is_capped() {
        let ul = create_element("ul").unwrap();
        ul.set_attribute("class", "list").unwrap();
        for _ in 0..5 {
            ul.append_child(&create_element("li").unwrap()).unwrap();
        }
        let lines = outline(&ul, 3);
        assert_eq!(lines, vec!["<ul class=\"list\">", "  <li>", "  <li>"]);
    }
}
