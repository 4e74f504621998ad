use crate::error::RootError;
use dom::{Document, NodeRef};

/// Appends `element` to the element of `document` whose id is `root_id`.
pub fn create_root(document: &Document, root_id: &str, element: &NodeRef) -> Result<(), RootError> {
    let container = document
        .get_element_by_id(root_id)
        .ok_or_else(|| RootError::NotFound(root_id.to_string()))?;
    container
        .append_child(element)
        .map_err(|source| RootError::Mount {
            id: root_id.to_string(),
            source,
        })?;
    log::debug!(target: "builder.element", "mounted {} under #{root_id}", element.node_name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::create_element;

    fn document_with_root() -> Document {
        let doc = Document::new();
        let root = create_element("div").unwrap();
        root.set_attribute("id", "root").unwrap();
        doc.body().unwrap().append_child(&root).unwrap();
        doc
    }

    #[test]
    fn mounts_under_container() {
        let doc = document_with_root();
        let app = create_element("main").unwrap();
        create_root(&doc, "root", &app).unwrap();
        assert!(app.parent().unwrap().ptr_eq(&doc.get_element_by_id("root").unwrap()));
    }

    #[test]
    fn missing_container_is_an_error() {
        let doc = document_with_root();
        let app = create_element("main").unwrap();
        assert_eq!(
            create_root(&doc, "nope", &app),
            Err(RootError::NotFound("nope".to_string()))
        );
        assert!(app.parent().is_none());
    }

    #[test]
    fn mounting_an_ancestor_fails() {
        let doc = document_with_root();
        let body = doc.body().unwrap();
        assert!(matches!(
            create_root(&doc, "root", &body),
            Err(RootError::Mount { .. })
        ));
    }
}
