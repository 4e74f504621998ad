use crate::element::create_with_tag;
use crate::error::BuildError;
use crate::tags::TagName;
use crate::value::AttributeBag;
use dom::NodeRef;

pub const DEFAULT_OUTLET_ID: &str = "router-wrap";

/// A `<section>` marking where a client-side router renders, tagged with
/// `data-vanilla-route-ele`.
pub fn outlet(id: Option<&str>) -> Result<NodeRef, BuildError> {
    let id = id.unwrap_or(DEFAULT_OUTLET_ID);
    create_with_tag(
        TagName::Section,
        Some(AttributeBag::new().with("dataVanillaRouteEle", id)),
        (),
    )
}
