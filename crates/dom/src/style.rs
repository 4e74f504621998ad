use crate::node::NodeRef;

/// Inline style of one element: ordered `(property, value)` pairs with
/// kebab-case property names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    decls: Vec<(String, String)>,
}

/// Maps a scripting-style property name onto its CSS spelling.
///
/// `fontSize` becomes `font-size`, `cssFloat` becomes `float`, a leading
/// capital marks a vendor prefix (`WebkitTransform` -> `-webkit-transform`).
/// Custom properties (`--x`) and names that already contain a hyphen are kept.
pub fn css_property_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") || name.contains('-') {
        return name.to_string();
    }
    if name == "cssFloat" {
        return "float".to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl StyleDeclaration {
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn clear(&mut self) {
        self.decls.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.decls.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = css_property_name(name);
        self.decls
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets one property in place; an empty value removes it.
    pub fn set(&mut self, name: &str, value: &str) {
        let name = css_property_name(name);
        let value = value.trim();
        if name.is_empty() {
            return;
        }
        if value.is_empty() {
            self.decls.retain(|(k, _)| *k != name);
            return;
        }
        match self.decls.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.decls.push((name, value.to_string())),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let name = css_property_name(name);
        let pos = self.decls.iter().position(|(k, _)| *k == name)?;
        Some(self.decls.remove(pos).1)
    }

    pub fn css_text(&self) -> String {
        self.decls
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replaces every declaration with the ones parsed from `text`.
    /// Malformed declarations are dropped.
    pub fn set_css_text(&mut self, text: &str) {
        self.decls.clear();
        for decl in text.split(';') {
            let Some((name, value)) = decl.split_once(':') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                continue;
            }
            self.set(name, value);
        }
    }
}

/// Live view over an element's inline style, like `element.style`.
///
/// On nodes that are not elements every read is empty and writes are ignored.
pub struct Style {
    node: NodeRef,
}

impl Style {
    pub fn get(&self, name: &str) -> Option<String> {
        self.node
            .with_element(|el| el.style.get(name).map(str::to_string))
            .flatten()
    }

    pub fn set(&self, name: &str, value: &str) {
        self.node.with_element_mut(|el| el.style.set(name, value));
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.node.with_element_mut(|el| el.style.remove(name)).flatten()
    }

    pub fn css_text(&self) -> String {
        self.node
            .with_element(|el| el.style.css_text())
            .unwrap_or_default()
    }

    pub fn set_css_text(&self, text: &str) {
        self.node.with_element_mut(|el| el.style.set_css_text(text));
    }

    pub fn len(&self) -> usize {
        self.node.with_element(|el| el.style.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        self.node
            .with_element(|el| {
                el.style
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl NodeRef {
    pub fn style(&self) -> Style {
        Style { node: self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("color", "color")]
    #[case("fontSize", "font-size")]
    #[case("borderTopLeftRadius", "border-top-left-radius")]
    #[case("cssFloat", "float")]
    #[case("WebkitTransform", "-webkit-transform")]
    #[case("--brand-color", "--brand-color")]
    #[case("background-color", "background-color")]
    fn property_names_map_to_css(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(css_property_name(input), expected);
    }

    #[test]
    fn set_overwrites_in_place_and_empty_removes() {
        let mut style = StyleDeclaration::default();
        style.set("color", "red");
        style.set("fontSize", "16px");
        style.set("color", "blue");
        assert_eq!(style.css_text(), "color: blue; font-size: 16px;");
        style.set("color", "");
        assert_eq!(style.css_text(), "font-size: 16px;");
    }

    #[test]
    fn css_text_round_trips_and_drops_garbage() {
        let mut style = StyleDeclaration::default();
        style.set_css_text("color: red; nonsense; margin : 0 auto ;; bad name: 1");
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.get("margin"), Some("0 auto"));
        assert_eq!(style.len(), 2);
    }
}
