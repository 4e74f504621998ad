use crate::error::DomError;
use crate::event::EventHandler;
use crate::property::PropValue;
use crate::style::StyleDeclaration;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Html,
    Svg,
}

impl Namespace {
    pub fn uri(self) -> &'static str {
        match self {
            Namespace::Html => "http://www.w3.org/1999/xhtml",
            Namespace::Svg => "http://www.w3.org/2000/svg",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
    Comment,
    Document,
    DocumentFragment,
}

#[derive(Debug)]
pub(crate) struct ElementData {
    pub(crate) namespace: Namespace,
    pub(crate) local_name: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) style: StyleDeclaration,
    pub(crate) listeners: Vec<(String, EventHandler)>,
    /// `on<event>` property slots; at most one handler per event type.
    pub(crate) handler_slots: Vec<(String, EventHandler)>,
}

impl ElementData {
    fn new(namespace: Namespace, local_name: String) -> Self {
        Self {
            namespace,
            local_name,
            attributes: Vec::new(),
            style: StyleDeclaration::default(),
            listeners: Vec::new(),
            handler_slots: Vec::new(),
        }
    }

    /// HTML elements fold attribute names to ASCII lowercase; SVG keeps them verbatim.
    pub(crate) fn normalize_attr_name(&self, name: &str) -> String {
        match self.namespace {
            Namespace::Html => name.to_ascii_lowercase(),
            Namespace::Svg => name.to_string(),
        }
    }
}

#[derive(Debug)]
pub(crate) enum NodeKind {
    Document,
    Fragment,
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Weak<RefCell<NodeData>>,
    pub(crate) children: Vec<NodeRef>,
    /// Expando properties that do not reflect to attributes.
    pub(crate) properties: Vec<(String, PropValue)>,
}

/// Shared handle to a live node.
///
/// Cloning the handle never clones the node: equality is identity, and every
/// clone observes the same attributes, children and listeners. Parents own
/// their children; the parent link is weak.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<NodeData>>);

/// Returns true when `name` is usable as an element or attribute name.
///
/// This is the XML `Name` production restricted to what markup in practice
/// uses: a letter, `_` or `:` (or any non-ASCII char) first, then letters,
/// digits, `-`, `.`, `_`, `:` or non-ASCII.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == ':' || !first.is_ascii()) {
        return false;
    }
    chars.all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | ':') || !c.is_ascii()
    })
}

impl NodeRef {
    pub(crate) fn from_kind(kind: NodeKind) -> Self {
        NodeRef(Rc::new(RefCell::new(NodeData {
            kind,
            parent: Weak::new(),
            children: Vec::new(),
            properties: Vec::new(),
        })))
    }

    pub(crate) fn new_element(namespace: Namespace, local_name: String) -> Self {
        Self::from_kind(NodeKind::Element(ElementData::new(namespace, local_name)))
    }

    pub(crate) fn data(&self) -> std::cell::Ref<'_, NodeData> {
        self.0.borrow()
    }

    pub(crate) fn data_mut(&self) -> std::cell::RefMut<'_, NodeData> {
        self.0.borrow_mut()
    }

    pub(crate) fn with_element<R>(&self, f: impl FnOnce(&ElementData) -> R) -> Option<R> {
        match &self.data().kind {
            NodeKind::Element(el) => Some(f(el)),
            _ => None,
        }
    }

    pub(crate) fn with_element_mut<R>(&self, f: impl FnOnce(&mut ElementData) -> R) -> Option<R> {
        match &mut self.data_mut().kind {
            NodeKind::Element(el) => Some(f(el)),
            _ => None,
        }
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn node_type(&self) -> NodeType {
        match &self.data().kind {
            NodeKind::Document => NodeType::Document,
            NodeKind::Fragment => NodeType::DocumentFragment,
            NodeKind::Element(_) => NodeType::Element,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Comment(_) => NodeType::Comment,
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    pub fn is_fragment(&self) -> bool {
        self.node_type() == NodeType::DocumentFragment
    }

    pub fn node_name(&self) -> String {
        match &self.data().kind {
            NodeKind::Document => "#document".to_string(),
            NodeKind::Fragment => "#document-fragment".to_string(),
            NodeKind::Element(el) => qualified_tag_name(el),
            NodeKind::Text(_) => "#text".to_string(),
            NodeKind::Comment(_) => "#comment".to_string(),
        }
    }

    /// `DIV` for HTML elements, the verbatim local name for SVG ones.
    pub fn tag_name(&self) -> Option<String> {
        self.with_element(qualified_tag_name)
    }

    pub fn local_name(&self) -> Option<String> {
        self.with_element(|el| el.local_name.clone())
    }

    pub fn namespace(&self) -> Option<Namespace> {
        self.with_element(|el| el.namespace)
    }

    pub fn parent(&self) -> Option<NodeRef> {
        self.data().parent.upgrade().map(NodeRef)
    }

    pub fn children(&self) -> Vec<NodeRef> {
        self.data().children.clone()
    }

    pub fn element_children(&self) -> Vec<NodeRef> {
        self.data()
            .children
            .iter()
            .filter(|c| c.is_element())
            .cloned()
            .collect()
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn child(&self, index: usize) -> Option<NodeRef> {
        self.data().children.get(index).cloned()
    }

    pub fn first_child(&self) -> Option<NodeRef> {
        self.data().children.first().cloned()
    }

    pub fn last_child(&self) -> Option<NodeRef> {
        self.data().children.last().cloned()
    }

    pub fn has_child_nodes(&self) -> bool {
        !self.data().children.is_empty()
    }

    fn index_in_parent(&self) -> Option<(NodeRef, usize)> {
        let parent = self.parent()?;
        let index = parent
            .data()
            .children
            .iter()
            .position(|c| c.ptr_eq(self))?;
        Some((parent, index))
    }

    pub fn previous_sibling(&self) -> Option<NodeRef> {
        let (parent, index) = self.index_in_parent()?;
        index.checked_sub(1).and_then(|i| parent.child(i))
    }

    pub fn next_sibling(&self) -> Option<NodeRef> {
        let (parent, index) = self.index_in_parent()?;
        parent.child(index + 1)
    }

    /// Walks parent links; the node itself counts.
    pub fn is_inclusive_ancestor_of(&self, other: &NodeRef) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node.ptr_eq(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Character data of text and comment nodes.
    pub fn data_text(&self) -> Option<String> {
        match &self.data().kind {
            NodeKind::Text(t) | NodeKind::Comment(t) => Some(t.clone()),
            _ => None,
        }
    }

    pub fn text_content(&self) -> String {
        fn collect(node: &NodeRef, out: &mut String) {
            match &node.data().kind {
                NodeKind::Text(t) => out.push_str(t),
                NodeKind::Comment(_) => {}
                NodeKind::Document | NodeKind::Fragment | NodeKind::Element(_) => {
                    for c in &node.data().children {
                        collect(c, out);
                    }
                }
            }
        }
        if let NodeKind::Comment(t) = &self.data().kind {
            return t.clone();
        }
        let mut out = String::new();
        collect(self, &mut out);
        out
    }

    /// Replaces all children with a single text node (none for an empty string).
    pub fn set_text_content(&self, text: &str) {
        {
            let mut data = self.data_mut();
            match &mut data.kind {
                NodeKind::Text(t) | NodeKind::Comment(t) => {
                    *t = text.to_string();
                    return;
                }
                NodeKind::Document => return,
                NodeKind::Fragment | NodeKind::Element(_) => {}
            }
        }
        let old = std::mem::take(&mut self.data_mut().children);
        for c in &old {
            c.data_mut().parent = Weak::new();
        }
        if !text.is_empty() {
            let node = NodeRef::from_kind(NodeKind::Text(text.to_string()));
            node.data_mut().parent = Rc::downgrade(&self.0);
            self.data_mut().children.push(node);
        }
    }

    pub fn append_child(&self, child: &NodeRef) -> Result<NodeRef, DomError> {
        self.insert_before(child, None)
    }

    /// Inserts `node` before `reference` (or last when `None`).
    ///
    /// A node that already has a parent is moved. A fragment is spliced: its
    /// children move in order and the fragment is left empty.
    pub fn insert_before(
        &self,
        node: &NodeRef,
        reference: Option<&NodeRef>,
    ) -> Result<NodeRef, DomError> {
        self.ensure_pre_insert(node)?;
        if let Some(r) = reference {
            if !r.parent().is_some_and(|p| p.ptr_eq(self)) {
                return Err(DomError::NotFound);
            }
        }
        let reference = match reference {
            Some(r) if r.ptr_eq(node) => node.next_sibling(),
            other => other.cloned(),
        };

        let moving = if node.is_fragment() {
            let kids = std::mem::take(&mut node.data_mut().children);
            for k in &kids {
                k.data_mut().parent = Weak::new();
            }
            kids
        } else {
            node.detach();
            vec![node.clone()]
        };

        log::trace!(
            target: "dom.tree",
            "insert {} node(s) into {}",
            moving.len(),
            self.node_name()
        );

        for m in &moving {
            m.data_mut().parent = Rc::downgrade(&self.0);
        }
        let mut data = self.data_mut();
        let at = reference
            .and_then(|r| data.children.iter().position(|c| c.ptr_eq(&r)))
            .unwrap_or(data.children.len());
        data.children.splice(at..at, moving);
        Ok(node.clone())
    }

    pub fn remove_child(&self, child: &NodeRef) -> Result<NodeRef, DomError> {
        if !child.parent().is_some_and(|p| p.ptr_eq(self)) {
            return Err(DomError::NotFound);
        }
        child.detach();
        Ok(child.clone())
    }

    /// Detaches the node from its parent, if any.
    pub fn remove(&self) {
        self.detach();
    }

    fn detach(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent.data_mut().children.retain(|c| !c.ptr_eq(self));
        self.data_mut().parent = Weak::new();
    }

    fn ensure_pre_insert(&self, node: &NodeRef) -> Result<(), DomError> {
        let parent_type = self.node_type();
        if !matches!(
            parent_type,
            NodeType::Document | NodeType::DocumentFragment | NodeType::Element
        ) {
            return Err(DomError::HierarchyRequest("parent cannot have children"));
        }
        if node.is_inclusive_ancestor_of(self) {
            return Err(DomError::HierarchyRequest(
                "node is an inclusive ancestor of the parent",
            ));
        }
        match node.node_type() {
            NodeType::Document => Err(DomError::HierarchyRequest(
                "a document cannot be inserted",
            )),
            NodeType::Text if parent_type == NodeType::Document => Err(
                DomError::HierarchyRequest("text cannot be a child of a document"),
            ),
            NodeType::DocumentFragment
                if parent_type == NodeType::Document
                    && node.data().children.iter().any(|c| c.is_text()) =>
            {
                Err(DomError::HierarchyRequest(
                    "text cannot be a child of a document",
                ))
            }
            _ => Ok(()),
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.with_element(|el| {
            let name = el.normalize_attr_name(name);
            if name == "style" {
                return (!el.style.is_empty()).then(|| el.style.css_text());
            }
            el.attributes
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
        })
        .flatten()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Sets an attribute, keeping the position of an existing one.
    ///
    /// `style` is routed through the inline style declaration. Non-elements
    /// ignore the call.
    pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        if !is_valid_name(name) {
            return Err(DomError::InvalidCharacter(name.to_string()));
        }
        self.with_element_mut(|el| {
            let name = el.normalize_attr_name(name);
            if name == "style" {
                el.style.set_css_text(value);
                return;
            }
            match el.attributes.iter_mut().find(|(k, _)| *k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => el.attributes.push((name, value.to_string())),
            }
        });
        Ok(())
    }

    pub fn remove_attribute(&self, name: &str) {
        self.with_element_mut(|el| {
            let name = el.normalize_attr_name(name);
            if name == "style" {
                el.style.clear();
                return;
            }
            el.attributes.retain(|(k, _)| *k != name);
        });
    }

    /// Attributes in insertion order; a non-empty inline style is reported last.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.with_element(|el| {
            let mut out = el.attributes.clone();
            if !el.style.is_empty() {
                out.push(("style".to_string(), el.style.css_text()));
            }
            out
        })
        .unwrap_or_default()
    }

    pub fn id(&self) -> String {
        self.get_attribute("id").unwrap_or_default()
    }

    pub fn class_name(&self) -> String {
        self.get_attribute("class").unwrap_or_default()
    }

    pub fn class_list(&self) -> Vec<String> {
        self.class_name()
            .split_ascii_whitespace()
            .map(str::to_string)
            .collect()
    }
}

fn qualified_tag_name(el: &ElementData) -> String {
    match el.namespace {
        Namespace::Html => el.local_name.to_ascii_uppercase(),
        Namespace::Svg => el.local_name.clone(),
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for NodeRef {}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data().kind {
            NodeKind::Element(el) => {
                write!(f, "<{}", el.local_name)?;
                if let Some((_, id)) = el.attributes.iter().find(|(k, _)| k == "id") {
                    write!(f, " id={id:?}")?;
                }
                write!(f, "> ({} children)", self.data().children.len())
            }
            NodeKind::Text(t) => write!(f, "#text {t:?}"),
            NodeKind::Comment(t) => write!(f, "#comment {t:?}"),
            NodeKind::Document => f.write_str("#document"),
            NodeKind::Fragment => {
                write!(f, "#document-fragment ({} children)", self.data().children.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{create_document_fragment, create_element, create_text_node};

    #[test]
    fn append_moves_node_between_parents() {
        let a = create_element("div").unwrap();
        let b = create_element("div").unwrap();
        let child = create_element("span").unwrap();

        a.append_child(&child).unwrap();
        b.append_child(&child).unwrap();

        assert_eq!(a.child_count(), 0);
        assert_eq!(b.child_count(), 1);
        assert!(child.parent().unwrap().ptr_eq(&b));
    }

    #[test]
    fn appending_fragment_splices_and_empties_it() {
        let frag = create_document_fragment();
        frag.append_child(&create_text_node("a")).unwrap();
        frag.append_child(&create_element("b").unwrap()).unwrap();
        let host = create_element("p").unwrap();
        host.append_child(&create_text_node("first")).unwrap();

        host.append_child(&frag).unwrap();

        assert_eq!(frag.child_count(), 0);
        assert_eq!(host.child_count(), 3);
        assert_eq!(host.text_content(), "firsta");
        assert!(host.child(2).unwrap().parent().unwrap().ptr_eq(&host));
    }

    #[test]
    fn inserting_ancestor_is_rejected() {
        let outer = create_element("div").unwrap();
        let inner = create_element("div").unwrap();
        outer.append_child(&inner).unwrap();

        let err = inner.append_child(&outer).unwrap_err();
        assert!(matches!(err, DomError::HierarchyRequest(_)));
        assert!(matches!(
            outer.append_child(&outer),
            Err(DomError::HierarchyRequest(_))
        ));
    }

    #[test]
    fn text_nodes_cannot_have_children() {
        let text = create_text_node("x");
        let err = text.append_child(&create_text_node("y")).unwrap_err();
        assert!(matches!(err, DomError::HierarchyRequest(_)));
    }

    #[test]
    fn insert_before_reference_keeps_order() {
        let list = create_element("ul").unwrap();
        let first = create_element("li").unwrap();
        let last = create_element("li").unwrap();
        list.append_child(&last).unwrap();
        list.insert_before(&first, Some(&last)).unwrap();

        assert!(list.first_child().unwrap().ptr_eq(&first));
        assert!(first.next_sibling().unwrap().ptr_eq(&last));
        assert!(last.previous_sibling().unwrap().ptr_eq(&first));
    }

    #[test]
    fn insert_before_foreign_reference_fails() {
        let list = create_element("ul").unwrap();
        let stranger = create_element("li").unwrap();
        let err = list
            .insert_before(&create_element("li").unwrap(), Some(&stranger))
            .unwrap_err();
        assert_eq!(err, DomError::NotFound);
    }

    #[test]
    fn remove_child_requires_parentage() {
        let parent = create_element("div").unwrap();
        let child = create_element("i").unwrap();
        assert_eq!(parent.remove_child(&child), Err(DomError::NotFound));
        parent.append_child(&child).unwrap();
        parent.remove_child(&child).unwrap();
        assert!(child.parent().is_none());
        assert!(!parent.has_child_nodes());
    }

    #[test]
    fn html_attribute_names_fold_to_lowercase() {
        let el = create_element("div").unwrap();
        el.set_attribute("Data-X", "1").unwrap();
        assert_eq!(el.get_attribute("data-x").as_deref(), Some("1"));
        assert_eq!(el.attributes(), vec![("data-x".to_string(), "1".to_string())]);
    }

    #[test]
    fn invalid_attribute_names_are_rejected() {
        let el = create_element("div").unwrap();
        assert!(matches!(
            el.set_attribute("bad name", "x"),
            Err(DomError::InvalidCharacter(_))
        ));
        assert!(matches!(
            el.set_attribute("", "x"),
            Err(DomError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn set_text_content_replaces_children() {
        let el = create_element("div").unwrap();
        el.append_child(&create_element("span").unwrap()).unwrap();
        el.set_text_content("hello");
        assert_eq!(el.child_count(), 1);
        assert!(el.first_child().unwrap().is_text());
        el.set_text_content("");
        assert_eq!(el.child_count(), 0);
    }

    #[test]
    fn name_validation() {
        assert!(is_valid_name("div"));
        assert!(is_valid_name("my-element"));
        assert!(is_valid_name("svg:rect"));
        assert!(!is_valid_name("1div"));
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name("<div>"));
        assert!(!is_valid_name(""));
    }
}
