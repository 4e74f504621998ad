use crate::error::BuildError;
use dom::{NodeRef, create_text_node};

/// One entry of a child list.
#[derive(Clone, Debug)]
pub enum Child {
    /// Becomes a text node; the empty string is skipped.
    Text(String),
    /// Appended as is. A fragment moves its children in.
    Node(NodeRef),
    /// Placeholder that produces nothing.
    Empty,
}

impl Child {
    /// True for entries that produce no node.
    pub fn is_empty(&self) -> bool {
        match self {
            Child::Text(t) => t.is_empty(),
            Child::Node(_) => false,
            Child::Empty => true,
        }
    }

    fn into_node(self) -> Option<NodeRef> {
        match self {
            Child::Text(t) if !t.is_empty() => Some(create_text_node(&t)),
            Child::Node(n) => Some(n),
            _ => None,
        }
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Child::Text(s.to_string())
    }
}

impl From<String> for Child {
    fn from(s: String) -> Self {
        Child::Text(s)
    }
}

impl From<NodeRef> for Child {
    fn from(n: NodeRef) -> Self {
        Child::Node(n)
    }
}

impl From<&NodeRef> for Child {
    fn from(n: &NodeRef) -> Self {
        Child::Node(n.clone())
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(v: Option<T>) -> Self {
        v.map_or(Child::Empty, Into::into)
    }
}

/// What a construction call appends: nothing, one entry, or a flat list.
/// Lists do not nest.
#[derive(Clone, Debug, Default)]
pub enum Children {
    #[default]
    None,
    One(Child),
    Many(Vec<Child>),
}

impl From<()> for Children {
    fn from(_: ()) -> Self {
        Children::None
    }
}

impl From<Child> for Children {
    fn from(c: Child) -> Self {
        Children::One(c)
    }
}

impl From<&str> for Children {
    fn from(s: &str) -> Self {
        Children::One(s.into())
    }
}

impl From<String> for Children {
    fn from(s: String) -> Self {
        Children::One(s.into())
    }
}

impl From<NodeRef> for Children {
    fn from(n: NodeRef) -> Self {
        Children::One(n.into())
    }
}

impl From<&NodeRef> for Children {
    fn from(n: &NodeRef) -> Self {
        Children::One(n.into())
    }
}

impl From<Vec<Child>> for Children {
    fn from(v: Vec<Child>) -> Self {
        Children::Many(v)
    }
}

impl From<Vec<NodeRef>> for Children {
    fn from(v: Vec<NodeRef>) -> Self {
        Children::Many(v.into_iter().map(Child::Node).collect())
    }
}

impl From<Vec<&str>> for Children {
    fn from(v: Vec<&str>) -> Self {
        Children::Many(v.into_iter().map(Child::from).collect())
    }
}

/// Builds [`Children::Many`](crate::Children) from anything convertible to a
/// [`Child`](crate::Child).
#[macro_export]
macro_rules! children {
    () => {
        $crate::Children::None
    };
    ($($child:expr),+ $(,)?) => {
        $crate::Children::Many(vec![$($crate::Child::from($child)),+])
    };
}

/// Appends `children` to `parent` in order, skipping empty entries.
pub(crate) fn append_children(parent: &NodeRef, children: Children) -> Result<(), BuildError> {
    let list = match children {
        Children::None => return Ok(()),
        Children::One(child) => vec![child],
        Children::Many(list) => list,
    };
    for child in list {
        if let Some(node) = child.into_node() {
            parent.append_child(&node).map_err(BuildError::Child)?;
        }
    }
    Ok(())
}
