#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use wasm_bindgen::{JsCast, JsError};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element, HtmlElement};

use reveal_web::{RevealElement, STYLE_SHEET, create, parse};

wasm_bindgen_test_configure!(run_in_browser);

fn ok<T>(result: Result<T, JsError>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(_) => panic!("{what} failed"),
    }
}

fn document() -> Document {
    web_sys::window()
        .and_then(|window| window.document())
        .expect("browser document")
}

fn gallery(document: &Document, images: usize) -> Element {
    let container = document.create_element("div").expect("div");
    container.set_class_name("reveal");
    for index in 0..images {
        let img = document.create_element("img").expect("img");
        img.set_attribute("src", &format!("data:,{index}")).expect("src");
        container.append_child(&img).expect("append img");
    }
    document
        .body()
        .expect("body")
        .append_child(&container)
        .expect("append container");
    container
}

#[wasm_bindgen_test]
fn create_replaces_container_with_widget() {
    let document = document();
    let container = gallery(&document, 2);

    let widget = ok(create(container.clone()), "create");
    assert_eq!(widget.tag_name().to_lowercase(), "reveal-component");
    assert!(container.parent_node().is_none());

    let images = widget.query_selector_all("img").expect("query images");
    let slots: Vec<Option<String>> = (0..images.length())
        .filter_map(|index| images.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(|image| image.get_attribute("slot"))
        .collect();
    assert_eq!(slots, vec![Some("before".to_owned()), Some("after".to_owned())]);
}

#[wasm_bindgen_test]
fn create_rejects_single_image() {
    let document = document();
    let container = gallery(&document, 1);
    assert!(create(container.clone()).is_err());
    assert!(container.parent_node().is_some());
}

#[wasm_bindgen_test]
fn parse_returns_every_widget() {
    let document = document();
    let root = document.create_element("section").expect("section");
    document
        .body()
        .expect("body")
        .append_child(&root)
        .expect("append root");
    for _ in 0..2 {
        let container = gallery(&document, 2);
        root.append_child(&container).expect("move container");
    }

    let widgets = ok(parse(root.clone()), "parse");
    assert_eq!(widgets.length(), 2);
}

#[wasm_bindgen_test]
fn element_mounts_and_reports_state() {
    let document = document();
    let host: HtmlElement = document
        .create_element("div")
        .expect("host")
        .dyn_into()
        .expect("html element");
    host.style().set_property("width", "400px").expect("width");
    document
        .body()
        .expect("body")
        .append_child(&host)
        .expect("append host");

    let element = ok(RevealElement::new(host.clone()), "attach");
    ok(
        element.attribute_changed("start", None, Some("30".to_owned())),
        "start",
    );
    ok(element.connected(), "mount");

    assert!(ok(element.rendered(), "rendered"));
    assert_eq!(ok(element.open_ratio(), "open_ratio"), 30.0);
    assert_eq!(ok(element.element_width(), "element_width"), 400.0);
    // Left of the widget pins the divider to its own width.
    let divider = ok(element.drag_element_width(), "drag_element_width");
    assert_eq!(
        ok(element.calculate_open_ratio(-10.0), "calculate_open_ratio"),
        reveal_core::format_percentage((divider + divider / 2.0) / 400.0 * 100.0)
    );

    assert!(
        element
            .attribute_changed("width", None, Some("10".to_owned()))
            .is_err()
    );
    ok(element.disconnected(), "unmount");
    assert!(!ok(element.is_dragging(), "is_dragging"));
}

#[wasm_bindgen_test]
fn removed_element_stays_usable_without_listeners() {
    let document = document();
    let host: HtmlElement = document
        .create_element("div")
        .expect("host")
        .dyn_into()
        .expect("html element");
    document
        .body()
        .expect("body")
        .append_child(&host)
        .expect("append host");

    let element = ok(RevealElement::new(host.clone()), "attach");
    ok(element.connected(), "mount");
    ok(element.disconnected(), "unmount");
    host.remove();

    // Detached host: clicks and re-measures see zero width, nothing throws.
    assert!(ok(element.push_encoded_input(r#"{"kind":"click","x":5}"#), "click"));
    ok(element.update_dimensions(), "update_dimensions");
    assert_eq!(ok(element.element_width(), "element_width"), 0.0);
    drop(element);
}

#[wasm_bindgen_test]
fn style_sheet_styles_the_divider_part() {
    assert!(STYLE_SHEET.contains("#drag"));
    assert!(STYLE_SHEET.contains("var(--color, #fff)"));
}
