use crate::refs::Ref;
use dom::{Event, EventHandler, NodeRef, PropValue};

/// One value in an [`AttributeBag`].
#[derive(Clone, Debug)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    /// A plain boolean, assigned as a property.
    Bool(bool),
    /// A boxed boolean: `true` sets a bare attribute, `false` is skipped.
    Presence(bool),
    /// Ordered nested map, merged into the inline style under `style`.
    Object(Vec<(String, AttrValue)>),
    Handler(EventHandler),
    Ref(Ref),
    Node(NodeRef),
    Null,
}

impl AttrValue {
    pub fn presence(on: bool) -> Self {
        AttrValue::Presence(on)
    }

    pub fn handler(f: impl Fn(&Event) + 'static) -> Self {
        AttrValue::Handler(EventHandler::new(f))
    }

    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        AttrValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Property value for a direct assignment. A ref assigned under any other
    /// key is stored as a `{ current }` object snapshot.
    pub(crate) fn into_prop(self) -> PropValue {
        match self {
            AttrValue::Text(s) => PropValue::Str(s),
            AttrValue::Number(n) => PropValue::Number(n),
            AttrValue::Bool(b) | AttrValue::Presence(b) => PropValue::Bool(b),
            AttrValue::Object(entries) => PropValue::Object(
                entries.into_iter().map(|(k, v)| (k, v.into_prop())).collect(),
            ),
            AttrValue::Handler(h) => PropValue::Handler(h),
            AttrValue::Ref(r) => PropValue::Object(vec![(
                "current".to_string(),
                r.current().map_or(PropValue::Null, PropValue::Node),
            )]),
            AttrValue::Node(n) => PropValue::Node(n),
            AttrValue::Null => PropValue::Null,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        AttrValue::Text(s.clone())
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Number(n.into())
    }
}

impl From<u32> for AttrValue {
    fn from(n: u32) -> Self {
        AttrValue::Number(n.into())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<EventHandler> for AttrValue {
    fn from(h: EventHandler) -> Self {
        AttrValue::Handler(h)
    }
}

impl From<Ref> for AttrValue {
    fn from(r: Ref) -> Self {
        AttrValue::Ref(r)
    }
}

impl From<&Ref> for AttrValue {
    fn from(r: &Ref) -> Self {
        AttrValue::Ref(r.clone())
    }
}

impl From<NodeRef> for AttrValue {
    fn from(n: NodeRef) -> Self {
        AttrValue::Node(n)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(AttrValue::Null, Into::into)
    }
}

/// Ordered attribute mapping handed to a construction call.
///
/// Keys are unique; inserting an existing key replaces its value and keeps
/// its original position.
#[derive(Clone, Debug, Default)]
pub struct AttributeBag {
    entries: Vec<(String, AttrValue)>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaining form of [`AttributeBag::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the replaced value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl IntoIterator for AttributeBag {
    type Item = (String, AttrValue);
    type IntoIter = std::vec::IntoIter<(String, AttrValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = AttributeBag::new();
        for (k, v) in iter {
            bag.insert(k, v);
        }
        bag
    }
}

impl<K: Into<String>, V: Into<AttrValue>, const N: usize> From<[(K, V); N]> for AttributeBag {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Builds an [`AttributeBag`](crate::AttributeBag) from `key => value` pairs.
///
/// ```
/// let bag = builder::attrs! { "id" => "main", "tabIndex" => 2 };
/// assert_eq!(bag.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::AttributeBag::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut bag = $crate::AttributeBag::new();
        $( bag.insert($key, $value); )+
        bag
    }};
}
