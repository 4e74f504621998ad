use crate::attrs;
use crate::children::{Children, append_children};
use crate::error::BuildError;
use crate::tags::TagName;
use crate::value::AttributeBag;
use dom::{Namespace, NodeRef, create_element_ns};

/// Creates an element named `tag_name`, applies `options`, appends `children`.
///
/// Any name the host accepts works, known or not. Known SVG primitives are
/// created in the SVG namespace; everything else is HTML. An invalid name
/// fails before any attribute is looked at.
pub fn create(
    tag_name: &str,
    options: Option<AttributeBag>,
    children: impl Into<Children>,
) -> Result<NodeRef, BuildError> {
    let namespace = tag_name
        .parse::<TagName>()
        .map_or(Namespace::Html, TagName::namespace);
    build(namespace, tag_name, options, children.into())
}

/// [`create`] for a known tag.
pub fn create_with_tag(
    tag: TagName,
    options: Option<AttributeBag>,
    children: impl Into<Children>,
) -> Result<NodeRef, BuildError> {
    build(tag.namespace(), tag.as_str(), options, children.into())
}

fn build(
    namespace: Namespace,
    name: &str,
    options: Option<AttributeBag>,
    children: Children,
) -> Result<NodeRef, BuildError> {
    let node = create_element_ns(namespace, name).map_err(|source| BuildError::Construction {
        tag: name.to_string(),
        source,
    })?;
    log::trace!(target: "builder.element", "created <{name}>");
    attrs::apply(&node, options)?;
    append_children(&node, children)?;
    Ok(node)
}
