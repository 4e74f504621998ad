//! Scripting properties of nodes and how they reflect onto attributes.

use crate::error::DomError;
use crate::event::EventHandler;
use crate::node::NodeRef;

/// A value assignable to a node property.
#[derive(Clone, Debug)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Handler(EventHandler),
    Object(Vec<(String, PropValue)>),
    Node(NodeRef),
}

impl PropValue {
    /// String conversion used when a property reflects to an attribute.
    pub fn to_js_string(&self) -> String {
        match self {
            PropValue::Null => "null".to_string(),
            PropValue::Bool(b) => b.to_string(),
            PropValue::Number(n) => format_number(*n),
            PropValue::Str(s) => s.clone(),
            PropValue::Handler(_) => "function () { [native code] }".to_string(),
            PropValue::Object(_) => "[object Object]".to_string(),
            PropValue::Node(n) => format!("[object {}]", n.node_name()),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Null => false,
            PropValue::Bool(b) => *b,
            PropValue::Number(n) => *n != 0.0 && !n.is_nan(),
            PropValue::Str(s) => !s.is_empty(),
            PropValue::Handler(_) | PropValue::Object(_) | PropValue::Node(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Prints a number the way script engines do: integral values without a
/// fraction, exponent form outside `[1e-6, 1e21)`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    // Shortest round-trip digits.
    n.to_string()
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Str(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Number(n.into())
    }
}

/// How a property name maps onto element state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reflection {
    /// String property mirrored by the named attribute.
    Attr(&'static str),
    /// Boolean property mirrored by attribute presence.
    Presence(&'static str),
    /// `draggable`: boolean property, `"true"`/`"false"` attribute.
    Enumerated(&'static str),
    TabIndex,
    Style,
    TextContent,
    HandlerSlot,
    Expando,
}

/// String properties whose attribute shares their name.
const PLAIN_REFLECTED: &[&str] = &[
    "title",
    "lang",
    "dir",
    "href",
    "src",
    "alt",
    "name",
    "type",
    "value",
    "placeholder",
    "role",
    "rel",
    "target",
    "action",
    "method",
    "slot",
];

fn reflection(name: &str) -> Reflection {
    if let Some(attr) = PLAIN_REFLECTED.iter().copied().find(|a| *a == name) {
        return Reflection::Attr(attr);
    }
    match name {
        "id" => Reflection::Attr("id"),
        "className" => Reflection::Attr("class"),
        "htmlFor" => Reflection::Attr("for"),
        "accessKey" => Reflection::Attr("accesskey"),
        "hidden" => Reflection::Presence("hidden"),
        "disabled" => Reflection::Presence("disabled"),
        "checked" => Reflection::Presence("checked"),
        "readOnly" => Reflection::Presence("readonly"),
        "required" => Reflection::Presence("required"),
        "selected" => Reflection::Presence("selected"),
        "multiple" => Reflection::Presence("multiple"),
        "autofocus" => Reflection::Presence("autofocus"),
        "draggable" => Reflection::Enumerated("draggable"),
        "tabIndex" => Reflection::TabIndex,
        "style" => Reflection::Style,
        "textContent" | "innerText" => Reflection::TextContent,
        n if n.len() > 2
            && n.starts_with("on")
            && n[2..].bytes().all(|b| b.is_ascii_lowercase()) =>
        {
            Reflection::HandlerSlot
        }
        _ => Reflection::Expando,
    }
}

/// Elements that are focusable by default report `tabIndex` 0.
fn default_tab_index(local_name: &str) -> f64 {
    match local_name {
        "a" | "area" | "button" | "input" | "select" | "textarea" | "iframe" | "summary" => 0.0,
        _ => -1.0,
    }
}

impl NodeRef {
    /// Assigns a property the way a script assignment `node[name] = value` would.
    ///
    /// Reflected properties write attributes (`className` -> `class`), boolean
    /// ones toggle attribute presence, `style` replaces the inline style text,
    /// `textContent` replaces the children and `on<event>` sets the single
    /// handler slot for that event. Everything else becomes an expando
    /// property stored on the node.
    pub fn set_property(&self, name: &str, value: PropValue) -> Result<(), DomError> {
        let refl = if self.is_element() {
            reflection(name)
        } else {
            match name {
                "textContent" | "data" | "nodeValue" => Reflection::TextContent,
                _ => Reflection::Expando,
            }
        };
        log::trace!(target: "dom.tree", "property {name} via {refl:?}");

        match refl {
            Reflection::Attr(attr) => self.set_attribute(attr, &value.to_js_string())?,
            Reflection::Presence(attr) => {
                if value.is_truthy() {
                    self.set_attribute(attr, "")?;
                } else {
                    self.remove_attribute(attr);
                }
            }
            Reflection::Enumerated(attr) => {
                let flag = if value.is_truthy() { "true" } else { "false" };
                self.set_attribute(attr, flag)?;
            }
            Reflection::TabIndex => {
                let n = match &value {
                    PropValue::Number(n) => *n,
                    PropValue::Bool(b) => f64::from(u8::from(*b)),
                    PropValue::Str(s) => s.trim().parse().unwrap_or(0.0),
                    _ => 0.0,
                };
                let n = if n.is_finite() { n.trunc() } else { 0.0 };
                self.set_attribute("tabindex", &format_number(n))?;
            }
            Reflection::Style => {
                let text = match &value {
                    PropValue::Null => String::new(),
                    other => other.to_js_string(),
                };
                self.style().set_css_text(&text);
            }
            Reflection::TextContent => {
                let text = match &value {
                    PropValue::Null => String::new(),
                    other => other.to_js_string(),
                };
                self.set_text_content(&text);
            }
            Reflection::HandlerSlot => {
                let event_type = name[2..].to_string();
                self.with_element_mut(|el| {
                    el.handler_slots.retain(|(t, _)| *t != event_type);
                    if let PropValue::Handler(h) = value {
                        el.handler_slots.push((event_type, h));
                    }
                });
            }
            Reflection::Expando => {
                let mut data = self.data_mut();
                match data.properties.iter_mut().find(|(k, _)| k == name) {
                    Some((_, v)) => *v = value,
                    None => data.properties.push((name.to_string(), value)),
                }
            }
        }
        Ok(())
    }

    /// Reads a property; `None` means the property is not defined on the node.
    pub fn property(&self, name: &str) -> Option<PropValue> {
        if !self.is_element() {
            return match name {
                "textContent" | "data" | "nodeValue" => Some(PropValue::Str(self.text_content())),
                _ => self.expando(name),
            };
        }
        match reflection(name) {
            Reflection::Attr(attr) => Some(PropValue::Str(
                self.get_attribute(attr).unwrap_or_default(),
            )),
            Reflection::Presence(attr) => Some(PropValue::Bool(self.has_attribute(attr))),
            Reflection::Enumerated(attr) => Some(PropValue::Bool(
                self.get_attribute(attr).as_deref() == Some("true"),
            )),
            Reflection::TabIndex => {
                let parsed = self
                    .get_attribute("tabindex")
                    .and_then(|v| v.trim().parse::<f64>().ok());
                let fallback = self
                    .local_name()
                    .map(|n| default_tab_index(&n))
                    .unwrap_or(-1.0);
                Some(PropValue::Number(parsed.unwrap_or(fallback)))
            }
            Reflection::Style => Some(PropValue::Str(self.style().css_text())),
            Reflection::TextContent => Some(PropValue::Str(self.text_content())),
            Reflection::HandlerSlot => {
                let event_type = &name[2..];
                let slot = self
                    .with_element(|el| {
                        el.handler_slots
                            .iter()
                            .find(|(t, _)| t == event_type)
                            .map(|(_, h)| h.clone())
                    })
                    .flatten();
                Some(slot.map_or(PropValue::Null, PropValue::Handler))
            }
            Reflection::Expando => self.expando(name),
        }
    }

    fn expando(&self, name: &str) -> Option<PropValue> {
        self.data()
            .properties
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}
