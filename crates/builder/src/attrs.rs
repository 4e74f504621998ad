//! Attribute application: how each key of an [`AttributeBag`] lands on a node.

use crate::error::BuildError;
use crate::value::{AttrValue, AttributeBag};
use dom::{DomError, NodeRef, format_number};

/// How one attribute entry is applied. Rules are tried in declaration order
/// and the first match wins; `DirectProperty` catches everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    /// `ref` holding a [`Ref`](crate::Ref): filled with the node, never applied.
    RefAssignment,
    /// `style` holding an object (or null): shallow merge into the inline style.
    StyleMerge,
    /// `on` + uppercase letter holding a handler: listener for the lowercased rest.
    EventBinding { event: String },
    /// `data` + uppercase letter holding text: dataset entry `name`.
    DatasetAssignment { name: String },
    /// A boxed boolean: presence attribute when true, nothing when false.
    BooleanPresence { present: bool },
    DirectProperty,
}

/// Classifies one entry. Total over all keys.
pub fn classify(key: &str, value: &AttrValue) -> AttributeKind {
    match (key, value) {
        ("ref", AttrValue::Ref(_)) => AttributeKind::RefAssignment,
        ("style", AttrValue::Object(_) | AttrValue::Null) => AttributeKind::StyleMerge,
        (_, AttrValue::Handler(_)) if has_upper_after(key, "on") => AttributeKind::EventBinding {
            event: key[2..].to_lowercase(),
        },
        (_, AttrValue::Text(_)) if has_upper_after(key, "data") => {
            AttributeKind::DatasetAssignment {
                name: dataset_name(&key[4..]),
            }
        }
        (_, AttrValue::Presence(present)) => AttributeKind::BooleanPresence { present: *present },
        _ => AttributeKind::DirectProperty,
    }
}

fn has_upper_after(key: &str, prefix: &str) -> bool {
    key.strip_prefix(prefix)
        .and_then(|rest| rest.bytes().next())
        .is_some_and(|b| b.is_ascii_uppercase())
}

/// `TestId` -> `testId`, `Foo-bar` -> `fooBar`: hyphen-word pairs are
/// camel-cased, then a leading capital is lowered.
fn dataset_name(rest: &str) -> String {
    let mut out = String::with_capacity(rest.len());
    let mut chars = rest.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_alphanumeric() || next == '_' {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    let mut chars = out.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let mut lowered = String::with_capacity(out.len());
            lowered.push(first.to_ascii_lowercase());
            lowered.push_str(chars.as_str());
            lowered
        }
        _ => out,
    }
}

/// Applies `attributes` to `node` and returns the node.
///
/// A `ref` entry holding a [`Ref`](crate::Ref) is populated before any other
/// key, wherever it sits in the bag. Remaining entries are applied in
/// insertion order. The first host failure stops application; entries applied
/// before it stay.
pub fn apply(node: &NodeRef, attributes: Option<AttributeBag>) -> Result<NodeRef, BuildError> {
    let Some(attributes) = attributes else {
        return Ok(node.clone());
    };
    if attributes.is_empty() {
        return Ok(node.clone());
    }

    if let Some(AttrValue::Ref(r)) = attributes.get("ref") {
        r.populate(node);
    }

    for (key, value) in attributes {
        let kind = classify(&key, &value);
        log::debug!(target: "builder.attrs", "{key} -> {kind:?}");
        apply_one(node, &key, kind, value).map_err(|source| BuildError::Attribute { key, source })?;
    }
    Ok(node.clone())
}

fn apply_one(node: &NodeRef, key: &str, kind: AttributeKind, value: AttrValue) -> Result<(), DomError> {
    match kind {
        AttributeKind::RefAssignment => Ok(()),
        AttributeKind::StyleMerge => {
            if let AttrValue::Object(entries) = value {
                merge_style(node, entries);
            }
            Ok(())
        }
        AttributeKind::EventBinding { event } => {
            if let AttrValue::Handler(handler) = value {
                node.add_event_listener(&event, handler);
            }
            Ok(())
        }
        AttributeKind::DatasetAssignment { name } => match value {
            AttrValue::Text(text) => node.dataset().set(&name, &text),
            _ => Ok(()),
        },
        AttributeKind::BooleanPresence { present: true } => node.set_attribute(key, ""),
        AttributeKind::BooleanPresence { present: false } => Ok(()),
        AttributeKind::DirectProperty => node.set_property(key, value.into_prop()),
    }
}

fn merge_style(node: &NodeRef, entries: Vec<(String, AttrValue)>) {
    let style = node.style();
    for (name, value) in entries {
        match value {
            AttrValue::Text(text) => style.set(&name, &text),
            AttrValue::Number(n) => style.set(&name, &format_number(n)),
            AttrValue::Null => {
                style.remove(&name);
            }
            other => {
                log::debug!(target: "builder.attrs", "style {name}: ignoring {other:?}");
            }
        }
    }
}
