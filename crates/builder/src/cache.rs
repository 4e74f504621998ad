//! Process-wide memo of per-tag construction closures.
//!
//! Only the closure is shared; every call builds a fresh node. The map is
//! append-only and each value depends on nothing but its tag, so a racing
//! double insert is harmless.

use crate::children::Children;
use crate::element::create_with_tag;
use crate::error::BuildError;
use crate::tags::TagName;
use crate::value::AttributeBag;
use dom::NodeRef;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// A memoized constructor for one tag.
pub type TagBuilder =
    Arc<dyn Fn(Option<AttributeBag>, Children) -> Result<NodeRef, BuildError> + Send + Sync>;

fn cache() -> &'static RwLock<HashMap<TagName, TagBuilder>> {
    static CACHE: OnceLock<RwLock<HashMap<TagName, TagBuilder>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// The constructor for `tag`, created on first use.
pub fn builder_for(tag: TagName) -> TagBuilder {
    if let Some(found) = cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&tag)
    {
        return Arc::clone(found);
    }
    let mut map = cache().write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(map.entry(tag).or_insert_with(|| {
        log::trace!(target: "builder.cache", "memoizing builder for <{tag}>");
        Arc::new(move |attributes: Option<AttributeBag>, children: Children| {
            create_with_tag(tag, attributes, children)
        })
    }))
}

/// Lookup by name; `None` for names outside the known set.
pub fn builder_for_name(name: &str) -> Option<TagBuilder> {
    name.parse::<TagName>().ok().map(builder_for)
}

pub fn is_cached(tag: TagName) -> bool {
    cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(&tag)
}
