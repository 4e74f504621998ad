use crate::node::{NodeKind, NodeRef};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// A listener callback. Clones share the callback; identity decides
/// duplicate registration and removal, like function identity does for
/// `addEventListener`.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl EventHandler {
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        EventHandler(Rc::new(f))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    pub fn ptr_eq(&self, other: &EventHandler) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.0))
    }
}

impl<F: Fn(&Event) + 'static> From<F> for EventHandler {
    fn from(f: F) -> Self {
        EventHandler::new(f)
    }
}

/// A synthetic event. `Event::new` does not bubble, matching `new Event(type)`.
#[derive(Debug)]
pub struct Event {
    event_type: String,
    bubbles: bool,
    cancelable: bool,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
    target: RefCell<Option<NodeRef>>,
    current_target: RefCell<Option<NodeRef>>,
}

impl Event {
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            bubbles: false,
            cancelable: false,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
            target: RefCell::new(None),
            current_target: RefCell::new(None),
        }
    }

    pub fn bubbling(event_type: &str) -> Self {
        Self {
            bubbles: true,
            ..Self::new(event_type)
        }
    }

    pub fn cancelable(mut self) -> Self {
        self.cancelable = true;
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn target(&self) -> Option<NodeRef> {
        self.target.borrow().clone()
    }

    pub fn current_target(&self) -> Option<NodeRef> {
        self.current_target.borrow().clone()
    }

    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }
}

impl NodeRef {
    /// Registers `handler` for `event_type`. Registering the same handler
    /// instance twice for the same type is a no-op; distinct handlers always
    /// accumulate.
    pub fn add_event_listener(&self, event_type: &str, handler: EventHandler) {
        self.with_element_mut(|el| {
            let duplicate = el
                .listeners
                .iter()
                .any(|(t, h)| t == event_type && h.ptr_eq(&handler));
            if !duplicate {
                el.listeners.push((event_type.to_string(), handler));
            }
        });
        log::trace!(target: "dom.events", "listen {event_type} on {}", self.node_name());
    }

    pub fn remove_event_listener(&self, event_type: &str, handler: &EventHandler) {
        self.with_element_mut(|el| {
            el.listeners
                .retain(|(t, h)| !(t == event_type && h.ptr_eq(handler)));
        });
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.with_element(|el| {
            let listeners = el.listeners.iter().filter(|(t, _)| t == event_type).count();
            let slot = el.handler_slots.iter().filter(|(t, _)| t == event_type).count();
            listeners + slot
        })
        .unwrap_or(0)
    }

    /// Runs the listeners of the target, then of each ancestor when the event
    /// bubbles. Returns `false` when a listener cancelled the event.
    ///
    /// Listener lists are copied before invocation, so handlers may freely
    /// mutate the tree or register further listeners.
    pub fn dispatch_event(&self, event: &Event) -> bool {
        *event.target.borrow_mut() = Some(self.clone());
        let mut path = vec![self.clone()];
        if event.bubbles {
            let mut current = self.parent();
            while let Some(node) = current {
                current = node.parent();
                path.push(node);
            }
        }
        log::debug!(
            target: "dom.events",
            "dispatch {} on {} (path length {})",
            event.event_type,
            self.node_name(),
            path.len()
        );

        for node in path {
            let handlers = node.handlers_for(&event.event_type);
            if handlers.is_empty() {
                continue;
            }
            *event.current_target.borrow_mut() = Some(node.clone());
            for handler in handlers {
                handler.call(event);
            }
            if event.propagation_stopped.get() {
                break;
            }
        }
        *event.current_target.borrow_mut() = None;
        !event.default_prevented.get()
    }

    fn handlers_for(&self, event_type: &str) -> Vec<EventHandler> {
        match &self.data().kind {
            NodeKind::Element(el) => el
                .listeners
                .iter()
                .chain(el.handler_slots.iter())
                .filter(|(t, _)| t == event_type)
                .map(|(_, h)| h.clone())
                .collect(),
            _ => Vec::new(),
        }
    }
}
