use crate::error::DomError;
use crate::node::{Namespace, NodeKind, NodeRef, is_valid_name};
use crate::selector::SelectorList;

/// Creates an empty HTML element. The name is ASCII-lowercased.
pub fn create_element(name: &str) -> Result<NodeRef, DomError> {
    create_element_ns(Namespace::Html, name)
}

/// Creates an empty element in `namespace`; SVG names keep their case.
pub fn create_element_ns(namespace: Namespace, name: &str) -> Result<NodeRef, DomError> {
    if !is_valid_name(name) {
        log::debug!(target: "dom.tree", "rejecting element name {name:?}");
        return Err(DomError::InvalidCharacter(name.to_string()));
    }
    let local_name = match namespace {
        Namespace::Html => name.to_ascii_lowercase(),
        Namespace::Svg => name.to_string(),
    };
    Ok(NodeRef::new_element(namespace, local_name))
}

pub fn create_text_node(text: &str) -> NodeRef {
    NodeRef::from_kind(NodeKind::Text(text.to_string()))
}

pub fn create_comment(text: &str) -> NodeRef {
    NodeRef::from_kind(NodeKind::Comment(text.to_string()))
}

pub fn create_document_fragment() -> NodeRef {
    NodeRef::from_kind(NodeKind::Fragment)
}

/// A document: the root node plus lookups over its tree.
#[derive(Clone, Debug)]
pub struct Document {
    node: NodeRef,
}

impl Document {
    /// A document holding the usual `<html><head></head><body></body></html>`.
    pub fn new() -> Self {
        let doc = Self::empty();
        let html = NodeRef::new_element(Namespace::Html, "html".to_string());
        let head = NodeRef::new_element(Namespace::Html, "head".to_string());
        let body = NodeRef::new_element(Namespace::Html, "body".to_string());
        // Fresh nodes under a fresh root: none of the hierarchy checks can fail.
        let _ = html.append_child(&head);
        let _ = html.append_child(&body);
        let _ = doc.node.append_child(&html);
        doc
    }

    /// A document with no children at all.
    pub fn empty() -> Self {
        Self {
            node: NodeRef::from_kind(NodeKind::Document),
        }
    }

    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    pub fn document_element(&self) -> Option<NodeRef> {
        self.node.element_children().into_iter().next()
    }

    pub fn head(&self) -> Option<NodeRef> {
        self.child_of_root("head")
    }

    pub fn body(&self) -> Option<NodeRef> {
        self.child_of_root("body")
    }

    fn child_of_root(&self, name: &str) -> Option<NodeRef> {
        self.document_element()?
            .element_children()
            .into_iter()
            .find(|c| c.local_name().as_deref() == Some(name))
    }

    /// First element in tree order whose `id` attribute equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeRef> {
        if id.is_empty() {
            return None;
        }
        let mut stack = self.node.children();
        stack.reverse();
        while let Some(node) = stack.pop() {
            if node.get_attribute("id").as_deref() == Some(id) {
                return Some(node);
            }
            let mut kids = node.children();
            kids.reverse();
            stack.extend(kids);
        }
        None
    }

    pub fn query_selector(&self, selectors: &str) -> Result<Option<NodeRef>, DomError> {
        self.node.query_selector(selectors)
    }

    pub fn query_selector_all(&self, selectors: &str) -> Result<Vec<NodeRef>, DomError> {
        self.node.query_selector_all(selectors)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRef {
    /// First descendant element matching `selectors`, in tree order.
    pub fn query_selector(&self, selectors: &str) -> Result<Option<NodeRef>, DomError> {
        let list = SelectorList::parse(selectors)?;
        Ok(descendant_elements(self).into_iter().find(|el| list.matches(el)))
    }

    /// Every descendant element matching `selectors`, in tree order.
    pub fn query_selector_all(&self, selectors: &str) -> Result<Vec<NodeRef>, DomError> {
        let list = SelectorList::parse(selectors)?;
        Ok(descendant_elements(self)
            .into_iter()
            .filter(|el| list.matches(el))
            .collect())
    }

    pub fn matches(&self, selectors: &str) -> Result<bool, DomError> {
        let list = SelectorList::parse(selectors)?;
        Ok(self.is_element() && list.matches(self))
    }
}

fn descendant_elements(root: &NodeRef) -> Vec<NodeRef> {
    let mut out = Vec::new();
    fn walk(node: &NodeRef, out: &mut Vec<NodeRef>) {
        for c in node.children() {
            if c.is_element() {
                out.push(c.clone());
            }
            walk(&c, out);
        }
    }
    walk(root, &mut out);
    out
}
