use dom::NodeRef;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A handle the builder fills with the element it constructs.
///
/// Clones share one cell. Only the builder writes it, once, when the element
/// carrying the ref in its attribute bag is created; anyone may read it.
#[derive(Clone, Default)]
pub struct Ref(Rc<RefCell<Option<NodeRef>>>);

pub fn create_ref() -> Ref {
    Ref::default()
}

impl Ref {
    /// The referenced element, if construction has happened.
    pub fn current(&self) -> Option<NodeRef> {
        self.0.borrow().clone()
    }

    pub fn is_set(&self) -> bool {
        self.0.borrow().is_some()
    }

    pub fn ptr_eq(&self, other: &Ref) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn populate(&self, node: &NodeRef) {
        let previous = self.0.borrow_mut().replace(node.clone());
        if previous.is_some() {
            log::debug!(target: "builder.attrs", "ref reused; previous element replaced");
        }
    }
}

impl fmt::Debug for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ref").field("current", &self.current()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_cell() {
        let r = create_ref();
        let alias = r.clone();
        assert!(!r.is_set());
        let node = dom::create_element("p").unwrap();
        alias.populate(&node);
        assert!(r.current().unwrap().ptr_eq(&node));
        assert!(r.ptr_eq(&alias));
        assert!(!r.ptr_eq(&create_ref()));
    }
}
