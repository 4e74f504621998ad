//! A small live document tree: reference-counted nodes with parent links,
//! attributes, inline style, dataset, event listeners and a selector engine.
//!
//! Nodes are `!Send`; a tree belongs to the thread that built it.

mod dataset;
mod document;
mod error;
mod event;
mod node;
mod property;
mod selector;
mod serialize;
pub mod snapshot;
mod style;

pub use dataset::{Dataset, attribute_to_dataset_key, dataset_key_to_attribute};
pub use document::{
    Document, create_comment, create_document_fragment, create_element, create_element_ns,
    create_text_node,
};
pub use error::DomError;
pub use event::{Event, EventHandler};
pub use node::{Namespace, NodeRef, NodeType, is_valid_name};
pub use property::{PropValue, format_number};
pub use selector::SelectorList;
pub use snapshot::{DomSnapshot, DomSnapshotOptions, outline};
pub use style::{Style, StyleDeclaration, css_property_name};
