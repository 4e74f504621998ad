use dom::PropValue;

/// Truthiness of a class-map value.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! int_truthy {
    ($($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

int_truthy!(i32, i64, u32, u64, usize);

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for &str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl Truthy for PropValue {
    fn is_truthy(&self) -> bool {
        PropValue::is_truthy(self)
    }
}

/// Joins the keys whose values are truthy, in the order given. Keys are kept
/// verbatim, so an empty key still takes a slot: `[("", true), ("x", true)]`
/// gives `" x"`.
///
/// Mixed value types go through [`PropValue`]:
/// `class_names([("a", PropValue::from(true)), ("b", false.into()), ("c", 1.into())])`
/// is `"a c"`.
pub fn class_names<K, V>(classes: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: Truthy,
{
    classes
        .into_iter()
        .filter(|(_, value)| value.is_truthy())
        .map(|(name, _)| name.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One argument of [`join_classes`].
#[derive(Clone, Debug)]
pub enum ClassArg {
    Name(String),
    Map(Vec<(String, bool)>),
    Skip,
}

impl From<&str> for ClassArg {
    fn from(s: &str) -> Self {
        ClassArg::Name(s.to_string())
    }
}

impl From<String> for ClassArg {
    fn from(s: String) -> Self {
        ClassArg::Name(s)
    }
}

/// `false` contributes nothing; so does `true`, which has no name.
impl From<bool> for ClassArg {
    fn from(_: bool) -> Self {
        ClassArg::Skip
    }
}

impl<T: Into<ClassArg>> From<Option<T>> for ClassArg {
    fn from(v: Option<T>) -> Self {
        v.map_or(ClassArg::Skip, Into::into)
    }
}

impl<K: Into<String>, const N: usize> From<[(K, bool); N]> for ClassArg {
    fn from(pairs: [(K, bool); N]) -> Self {
        ClassArg::Map(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<Vec<(String, bool)>> for ClassArg {
    fn from(pairs: Vec<(String, bool)>) -> Self {
        ClassArg::Map(pairs)
    }
}

/// Variadic form: plain names, skipped falsy values and class maps, joined
/// with single spaces.
pub fn join_classes(args: impl IntoIterator<Item = ClassArg>) -> String {
    let mut names: Vec<String> = Vec::new();
    for arg in args {
        match arg {
            ClassArg::Name(name) => names.extend(name.split_ascii_whitespace().map(str::to_string)),
            ClassArg::Map(pairs) => {
                names.extend(pairs.into_iter().filter(|(_, on)| *on).map(|(k, _)| k))
            }
            ClassArg::Skip => {}
        }
    }
    names.join(" ")
}

/// `classes!("card", active.then_some("active"), [("hidden", hidden)])`
#[macro_export]
macro_rules! classes {
    ($($arg:expr),* $(,)?) => {
        {
            let args: ::std::vec::Vec<$crate::ClassArg> = ::std::vec![$($crate::ClassArg::from($arg)),*];
            $crate::join_classes(args)
        }
    };
}
