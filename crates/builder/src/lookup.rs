use dom::{Document, DomError, NodeRef};

/// First element of `document` matching `selector`, in document order.
pub fn get_element(document: &Document, selector: &str) -> Result<Option<NodeRef>, DomError> {
    document.query_selector(selector)
}

/// Every element of `document` matching `selector`, in document order.
pub fn get_all_elements(document: &Document, selector: &str) -> Result<Vec<NodeRef>, DomError> {
    document.query_selector_all(selector)
}
