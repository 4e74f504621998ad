//! `element.dataset`: camelCase keys backed by `data-*` attributes.

use crate::error::DomError;
use crate::node::NodeRef;

/// `testId` -> `data-test-id`.
///
/// A hyphen followed by an ASCII lowercase letter has no camelCase spelling
/// and is rejected, as browsers do.
pub fn dataset_key_to_attribute(key: &str) -> Result<String, DomError> {
    let bytes = key.as_bytes();
    if bytes
        .windows(2)
        .any(|w| w[0] == b'-' && w[1].is_ascii_lowercase())
    {
        return Err(DomError::Syntax(format!("invalid dataset key {key:?}")));
    }
    let mut out = String::with_capacity(key.len() + 8);
    out.push_str("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// `data-test-id` -> `testId`; `None` for attributes outside the `data-` space.
pub fn attribute_to_dataset_key(attr: &str) -> Option<String> {
    let rest = attr.strip_prefix("data-")?;
    let mut out = String::with_capacity(rest.len());
    let mut chars = rest.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('-', Some(next)) if next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    Some(out)
}

/// Live view over the `data-*` attributes of an element.
pub struct Dataset {
    node: NodeRef,
}

impl Dataset {
    pub fn get(&self, key: &str) -> Option<String> {
        let attr = dataset_key_to_attribute(key).ok()?;
        self.node.get_attribute(&attr)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), DomError> {
        let attr = dataset_key_to_attribute(key)?;
        log::trace!(target: "dom.tree", "dataset {key} -> {attr}");
        self.node.set_attribute(&attr, value)
    }

    pub fn remove(&self, key: &str) {
        if let Ok(attr) = dataset_key_to_attribute(key) {
            self.node.remove_attribute(&attr);
        }
    }

    /// `(camelCaseKey, value)` pairs in attribute order.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.node
            .attributes()
            .into_iter()
            .filter_map(|(k, v)| attribute_to_dataset_key(&k).map(|key| (key, v)))
            .collect()
    }
}

impl NodeRef {
    pub fn dataset(&self) -> Dataset {
        Dataset { node: self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::create_element;
    use rstest::rstest;

    #[rstest]
    #[case("testId", "data-test-id")]
    #[case("x", "data-x")]
    #[case("vanillaRouteEle", "data-vanilla-route-ele")]
    #[case("a1B", "data-a1-b")]
    fn keys_map_to_attributes(#[case] key: &str, #[case] attr: &str) {
        assert_eq!(dataset_key_to_attribute(key).unwrap(), attr);
        assert_eq!(attribute_to_dataset_key(attr).unwrap(), key);
    }

    #[test]
    fn hyphen_lowercase_keys_are_rejected() {
        assert!(matches!(
            dataset_key_to_attribute("test-id"),
            Err(DomError::Syntax(_))
        ));
        assert!(dataset_key_to_attribute("test-1").is_ok());
    }

    #[test]
    fn dataset_reflects_attributes() {
        let el = create_element("div").unwrap();
        el.dataset().set("userId", "42").unwrap();
        assert_eq!(el.get_attribute("data-user-id").as_deref(), Some("42"));
        el.set_attribute("data-role-name", "admin").unwrap();
        assert_eq!(el.dataset().get("roleName").as_deref(), Some("admin"));
        assert_eq!(
            el.dataset().entries(),
            vec![
                ("userId".to_string(), "42".to_string()),
                ("roleName".to_string(), "admin".to_string())
            ]
        );
        el.dataset().remove("userId");
        assert!(!el.has_attribute("data-user-id"));
    }
}
