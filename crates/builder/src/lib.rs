//! Declarative construction of live elements.
//!
//! ```
//! use builder::{AttrValue, attrs, children, tags};
//!
//! let list = tags::ul(
//!     attrs! { "className" => "menu", "dataRole" => "nav" },
//!     children![
//!         tags::li(None, "Home")?,
//!         tags::li(attrs! { "hidden" => AttrValue::presence(false) }, "About")?,
//!     ],
//! )?;
//! assert_eq!(list.child_count(), 2);
//! assert_eq!(list.dataset().get("role").as_deref(), Some("nav"));
//! # Ok::<(), builder::BuildError>(())
//! ```
//!
//! There is no virtual tree: every call allocates and returns real nodes of
//! the `dom` crate. See [`attrs::apply`] for how attribute keys are
//! interpreted.

pub mod attrs;
mod cache;
mod children;
mod class_names;
mod element;
mod error;
mod fragment;
mod lookup;
mod outlet;
mod refs;
mod root;
pub mod tags;
mod value;

pub use attrs::{AttributeKind, apply, classify};
pub use cache::{TagBuilder, builder_for, builder_for_name, is_cached};
pub use children::{Child, Children};
pub use class_names::{ClassArg, Truthy, class_names, join_classes};
pub use element::{create, create_with_tag};
pub use error::{BuildError, RootError, UnknownTag};
pub use fragment::{fragment, from_html_string};
pub use lookup::{get_all_elements, get_element};
pub use outlet::{DEFAULT_OUTLET_ID, outlet};
pub use refs::{Ref, create_ref};
pub use root::create_root;
pub use tags::TagName;
pub use value::{AttrValue, AttributeBag};

pub use net::{FetchConfig, FetchError, FetchOptions, fetch_json as fetcher};
