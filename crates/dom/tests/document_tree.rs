use dom::{
    Document, DomError, Event, EventHandler, NodeType, PropValue, create_comment,
    create_document_fragment, create_element, create_text_node,
};
use rstest::rstest;
use std::cell::RefCell;
use std::rc::Rc;

fn page() -> Document {
    let doc = Document::new();
    let body = doc.body().unwrap();
    let nav = create_element("nav").unwrap();
    nav.set_attribute("id", "top").unwrap();
    for (i, label) in ["home", "docs", "blog"].iter().enumerate() {
        let a = create_element("a").unwrap();
        a.set_attribute("class", if i == 1 { "link active" } else { "link" })
            .unwrap();
        a.dataset().set("slot", &i.to_string()).unwrap();
        a.append_child(&create_text_node(label)).unwrap();
        nav.append_child(&a).unwrap();
    }
    body.append_child(&nav).unwrap();
    body.append_child(&create_comment("end")).unwrap();
    doc
}

#[rstest]
#[case("a", 3)]
#[case("nav > a.link", 3)]
#[case("#top .active", 1)]
#[case("a[data-slot]", 3)]
#[case("body a, nav", 4)]
#[case("section a", 0)]
fn query_selector_all_counts(#[case] selector: &str, #[case] expected: usize) {
    let doc = page();
    assert_eq!(doc.query_selector_all(selector).unwrap().len(), expected);
}

#[test]
fn query_selector_returns_first_in_document_order() {
    let doc = page();
    let first = doc.query_selector("a").unwrap().unwrap();
    assert_eq!(first.text_content(), "home");
    assert!(doc.query_selector("table").unwrap().is_none());
    assert!(matches!(doc.query_selector("a[").unwrap_err(), DomError::Syntax(_)));
}

#[test]
fn get_element_by_id_tracks_live_tree() {
    let doc = page();
    let nav = doc.get_element_by_id("top").unwrap();
    nav.remove();
    assert!(doc.get_element_by_id("top").is_none());
    assert!(nav.parent().is_none());
}

#[test]
fn bubbling_visits_ancestors_in_order() {
    let doc = page();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = |label: &'static str| {
        let seen = seen.clone();
        EventHandler::new(move |e: &Event| {
            let current = e.current_target().map(|n| n.node_name());
            seen.borrow_mut().push(format!("{label}:{}", current.unwrap_or_default()));
        })
    };
    let link = doc.query_selector(".active").unwrap().unwrap();
    link.add_event_listener("click", record("link"));
    doc.get_element_by_id("top")
        .unwrap()
        .add_event_listener("click", record("nav"));
    doc.body().unwrap().add_event_listener("click", record("body"));

    link.dispatch_event(&Event::bubbling("click"));
    assert_eq!(*seen.borrow(), ["link:A", "nav:NAV", "body:BODY"]);

    seen.borrow_mut().clear();
    link.dispatch_event(&Event::new("click"));
    assert_eq!(*seen.borrow(), ["link:A"]);
}

#[test]
fn stop_propagation_and_prevent_default() {
    let parent = create_element("div").unwrap();
    let child = create_element("button").unwrap();
    parent.append_child(&child).unwrap();
    let parent_hit = Rc::new(RefCell::new(false));
    let flag = parent_hit.clone();
    parent.add_event_listener("submit", EventHandler::new(move |_| *flag.borrow_mut() = true));
    child.add_event_listener(
        "submit",
        EventHandler::new(|e: &Event| {
            e.stop_propagation();
            e.prevent_default();
        }),
    );

    let not_cancelled = child.dispatch_event(&Event::bubbling("submit").cancelable());
    assert!(!not_cancelled);
    assert!(!*parent_hit.borrow());
}

#[test]
fn same_handler_registers_once_and_removes_cleanly() {
    let node = create_element("div").unwrap();
    let handler = EventHandler::new(|_| {});
    node.add_event_listener("click", handler.clone());
    node.add_event_listener("click", handler.clone());
    assert_eq!(node.listener_count("click"), 1);
    node.remove_event_listener("click", &handler);
    assert_eq!(node.listener_count("click"), 0);
}

#[test]
fn fragment_children_move_on_append() {
    let frag = create_document_fragment();
    frag.append_child(&create_element("li").unwrap()).unwrap();
    frag.append_child(&create_element("li").unwrap()).unwrap();
    let list = create_element("ul").unwrap();
    list.append_child(&frag).unwrap();
    assert_eq!(list.child_count(), 2);
    assert_eq!(frag.child_count(), 0);
    assert_eq!(frag.node_type(), NodeType::DocumentFragment);
}

#[test]
fn hierarchy_errors() {
    let outer = create_element("div").unwrap();
    let inner = create_element("div").unwrap();
    outer.append_child(&inner).unwrap();
    assert!(matches!(
        inner.append_child(&outer),
        Err(DomError::HierarchyRequest(_))
    ));
    let text = create_text_node("t");
    assert!(matches!(
        text.append_child(&create_element("b").unwrap()),
        Err(DomError::HierarchyRequest(_))
    ));
    let stranger = create_element("p").unwrap();
    assert!(matches!(outer.remove_child(&stranger), Err(DomError::NotFound)));
}

#[test]
fn reflected_properties_and_expandos() {
    let input = create_element("input").unwrap();
    input.set_property("disabled", PropValue::Bool(true)).unwrap();
    input.set_property("tabIndex", PropValue::Number(2.7)).unwrap();
    input.set_property("model", PropValue::from("draft")).unwrap();

    assert!(input.has_attribute("disabled"));
    assert_eq!(input.get_attribute("tabindex").as_deref(), Some("2"));
    assert!(!input.has_attribute("model"));
    assert!(matches!(input.property("model"), Some(PropValue::Str(s)) if s == "draft"));

    input.set_property("disabled", PropValue::Bool(false)).unwrap();
    assert!(!input.has_attribute("disabled"));
}

#[test]
fn serialization_escapes_text_and_attributes() {
    let p = create_element("p").unwrap();
    p.set_attribute("title", "a \"quoted\" & more").unwrap();
    p.append_child(&create_text_node("1 < 2 & 3 > 2")).unwrap();
    p.style().set("fontWeight", "bold");
    assert_eq!(
        p.outer_html(),
        "<p title=\"a &quot;quoted&quot; &amp; more\" style=\"font-weight: bold;\">\
         1 &lt; 2 &amp; 3 &gt; 2</p>"
    );
}
