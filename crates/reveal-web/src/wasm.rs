#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the comparison widget.
//!
//! [`RevealElement`] backs one `<reveal-component>` instance: the custom
//! element class registered by [`define`] forwards its lifecycle callbacks
//! here. DOM collaborators:
//!
//! - `DomSurface` renders into a closed shadow root and writes styles.
//!   Notifications are queued while the widget is borrowed and dispatched
//!   as bubbling, composed `CustomEvent`s once the borrow is released, so page
//!   listeners may call back into the element.
//! - `DomViewport` registers passive listeners on the host element and the
//!   window, and drives `requestAnimationFrame` / `setTimeout` wake-ups.
//! - `DomTree` implements [`MarkupTree`] for [`create`] and [`parse`].
//!
//! # Lifetime
//!
//! The element owns its [`RevealElement`] through the `reveal` property set by
//! the class [`define`] registers. The Rust side holds the element and its
//! shadow root only through JS `WeakRef`s, and unmount removes every listener,
//! so a widget removed from the page leaves nothing in the wasm heap table that
//! keeps the element alive. Freeing the Rust half when the element is
//! collected needs a `--weak-refs` build (`wasm-pack build --weak-refs`);
//! without it the wrapper stays allocated until `free()` is called.
//!
//! Only compiled on `wasm32` targets.

use core::time::Duration;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CustomEvent, CustomEventInit, Document, Element, Event, EventTarget,
    HtmlElement, MouseEvent, ShadowRoot, ShadowRootInit, ShadowRootMode, TouchEvent, Window,
};

use reveal_core::{BoundingBox, PointerSample, SystemClock, TouchPoint};
use reveal_widget::{
    COMPONENT_NAME, Listener, ListenerTarget, MarkupError, MarkupTree, Notification,
    OBSERVED_ATTRIBUTES, Surface, Viewport, WidgetConfig, markup,
};

use crate::host_core::HostCore;
use crate::input_parser::HostInput;

/// Shadow-root stylesheet. The accent is read from the `--color` custom
/// property set on the host element.
pub const STYLE_SHEET: &str = r#"
:host {
  box-sizing: border-box;
  cursor: pointer;
  display: block;
  overflow: hidden;
  position: relative;
  user-select: none;
}

:host *,
:host *::before,
:host *::after {
  box-sizing: inherit;
}

#before {
  height: 100%;
  left: 0;
  overflow: hidden;
  position: absolute;
  top: 0;
  width: 50%;
}

#drag {
  background: var(--color, #fff);
  bottom: 0;
  cursor: ew-resize;
  left: 50%;
  margin-left: -1px;
  position: absolute;
  top: 0;
  width: 2px;
}

#drag::before {
  border: 3px solid var(--color, #fff);
  content: '';
  height: 30px;
  left: 50%;
  margin-left: -7px;
  margin-top: -15px;
  position: absolute;
  top: 50%;
  width: 14px;
}

::slotted(img) {
  max-height: 100%;
  object-fit: contain;
}

::slotted(img[slot=before]) {
  max-width: none;
}

::slotted(img[slot=after]) {
  display: block;
  max-width: 100%;
  width: 100%;
}
"#;

const SHADOW_STRUCTURE: &str = concat!(
    r#"<div id="before"><slot name="before"></slot></div>"#,
    r#"<slot name="after"></slot>"#,
    r#"<div id="drag" part="drag"></div>"#,
);

const BUSY: &str = "reveal widget is busy";

#[wasm_bindgen(inline_js = r#"
export function defineElement(name, observed, factory) {
  if (customElements.get(name)) {
    return false;
  }
  customElements.define(name, class extends HTMLElement {
    static get observedAttributes() {
      return observed;
    }
    constructor() {
      super();
      this.reveal = factory(this);
    }
    connectedCallback() {
      this.reveal.connected();
    }
    disconnectedCallback() {
      this.reveal.disconnected();
    }
    attributeChangedCallback(name, oldValue, newValue) {
      this.reveal.attributeChanged(name, oldValue, newValue);
    }
  });
  return true;
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = defineElement)]
    fn define_element(name: &str, observed: &Array, factory: &js_sys::Function) -> bool;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = WeakRef)]
    type JsWeakRef;

    #[wasm_bindgen(constructor, js_class = "WeakRef")]
    fn new(target: &JsValue) -> JsWeakRef;

    #[wasm_bindgen(method, js_class = "WeakRef", js_name = deref)]
    fn target(this: &JsWeakRef) -> JsValue;
}

/// DOM node held without keeping it alive.
struct WeakNode<T> {
    inner: JsWeakRef,
    _kind: core::marker::PhantomData<T>,
}

impl<T: JsCast> WeakNode<T> {
    fn new(node: &T) -> Self {
        Self {
            inner: JsWeakRef::new(node.as_ref()),
            _kind: core::marker::PhantomData,
        }
    }

    /// The node, unless it has been collected.
    fn get(&self) -> Option<T> {
        self.inner.target().dyn_into::<T>().ok()
    }
}

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!(
                    "reveal panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                ),
                None => format!("reveal panic: {info}"),
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), value);
}

fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn box_of(element: &Element) -> BoundingBox {
    let rect = element.get_bounding_client_rect();
    BoundingBox::new(rect.left(), rect.top(), rect.width(), rect.height())
}

// --- surface ---------------------------------------------------------------

/// Notifications waiting for the widget borrow to end.
struct Outbox {
    target: HtmlElement,
    component: String,
    notifications: Vec<Notification>,
}

impl Outbox {
    fn dispatch(self) {
        for notification in &self.notifications {
            if let Err(err) = self.dispatch_one(notification) {
                tracing::warn!(
                    message = "reveal.dom.notify",
                    kind = notification.kind.suffix(),
                    err = js_message(&err).as_str()
                );
            }
        }
    }

    fn dispatch_one(&self, notification: &Notification) -> Result<(), JsValue> {
        let detail = serde_json::to_string(&notification.detail)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let detail = js_sys::JSON::parse(&detail)?;

        let init = Object::new();
        set_js(&init, "bubbles", &JsValue::from_bool(notification.bubbles));
        set_js(&init, "composed", &JsValue::from_bool(notification.composed));
        set_js(&init, "detail", &detail);
        let event = CustomEvent::new_with_event_init_dict(
            &notification.event_name(&self.component),
            init.unchecked_ref::<CustomEventInit>(),
        )?;
        self.target.dispatch_event(&event)?;
        Ok(())
    }
}

/// Shadow-root rendering for one host element.
struct DomSurface {
    host: WeakNode<HtmlElement>,
    shadow: WeakNode<ShadowRoot>,
    component: String,
    pending: Vec<Notification>,
}

impl DomSurface {
    fn new(host: &HtmlElement, component: String) -> Result<Self, JsValue> {
        let shadow = host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Closed))?;
        Ok(Self {
            host: WeakNode::new(host),
            shadow: WeakNode::new(&shadow),
            component,
            pending: Vec::new(),
        })
    }

    fn part(&self, id: &str) -> Option<HtmlElement> {
        self.shadow
            .get()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    /// Queued notifications; dropped when the host is gone.
    fn take_outbox(&mut self) -> Option<Outbox> {
        let notifications = std::mem::take(&mut self.pending);
        Some(Outbox {
            target: self.host.get()?,
            component: self.component.clone(),
            notifications,
        })
    }
}

impl Surface for DomSurface {
    fn render_structure(&mut self) {
        if let Some(shadow) = self.shadow.get() {
            shadow.set_inner_html(&format!("<style>{STYLE_SHEET}</style>{SHADOW_STRUCTURE}"));
        }
    }

    fn host_box(&self) -> Option<BoundingBox> {
        let host = self.host.get()?;
        host.is_connected().then(|| box_of(&host))
    }

    fn divider_box(&self) -> Option<BoundingBox> {
        self.part("drag").map(|drag| box_of(&drag))
    }

    fn apply_open_ratio(&mut self, width: &str) {
        for (id, property) in [("before", "width"), ("drag", "left")] {
            let Some(part) = self.part(id) else {
                continue;
            };
            if let Err(err) = part.style().set_property(property, width) {
                tracing::warn!(message = "reveal.dom.style", id, err = js_message(&err).as_str());
            }
        }
    }

    fn apply_accent(&mut self, color: &str) {
        let Some(host) = self.host.get() else {
            return;
        };
        if let Err(err) = host.style().set_property("--color", color) {
            tracing::warn!(message = "reveal.dom.style", id = "host", err = js_message(&err).as_str());
        }
    }

    fn emit(&mut self, notification: &Notification) {
        self.pending.push(notification.clone());
    }
}

// --- viewport --------------------------------------------------------------

type DomCore = HostCore<DomSurface, DomViewport>;

/// Run `f` against the widget, then dispatch queued notifications.
fn run_with_core<R>(
    shared: &RefCell<DomCore>,
    clock: SystemClock,
    f: impl FnOnce(&mut DomCore) -> R,
) -> Result<R, JsError> {
    let (result, outbox) = {
        let mut core = shared.try_borrow_mut().map_err(|_| JsError::new(BUSY))?;
        core.set_time(clock.now());
        let result = f(&mut core);
        (result, core.controller_mut().surface_mut().take_outbox())
    };
    if let Some(outbox) = outbox {
        outbox.dispatch();
    }
    Ok(result)
}

fn run_with_weak(weak: &Weak<RefCell<DomCore>>, clock: SystemClock, f: impl FnOnce(&mut DomCore)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    if run_with_core(&shared, clock, f).is_err() {
        tracing::warn!(message = "reveal.dom.reentrant");
    }
}

fn mouse_sample(event: &Event) -> Option<PointerSample> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(PointerSample::mouse(
        f64::from(mouse.client_x()),
        f64::from(mouse.client_y()),
    ))
}

fn touch_sample(event: &Event) -> Option<PointerSample> {
    let list = event.dyn_ref::<TouchEvent>()?.touches();
    let touches = (0..list.length())
        .filter_map(|index| list.get(index))
        .map(|touch| TouchPoint::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
        .collect();
    Some(PointerSample::Touch { touches })
}

fn host_input_from_event(listener: Listener, event: &Event) -> Option<HostInput> {
    match listener {
        Listener::MouseDown | Listener::TouchStart => Some(HostInput::Press),
        Listener::MouseUp | Listener::TouchEnd => Some(HostInput::Release),
        Listener::Resize => Some(HostInput::Resize),
        Listener::MouseMove => mouse_sample(event).map(HostInput::Move),
        Listener::TouchMove => touch_sample(event).map(HostInput::Move),
        Listener::Click => mouse_sample(event).map(HostInput::Click),
    }
}

/// Listener registration and wake-ups for one widget.
struct DomViewport {
    host: WeakNode<HtmlElement>,
    window: Window,
    core: Weak<RefCell<DomCore>>,
    clock: SystemClock,
    handlers: HashMap<Listener, Closure<dyn FnMut(Event)>>,
    frame_requested: Rc<Cell<bool>>,
    timer: Option<(i32, Closure<dyn FnMut()>)>,
}

impl DomViewport {
    fn new(
        host: &HtmlElement,
        window: Window,
        core: Weak<RefCell<DomCore>>,
        clock: SystemClock,
    ) -> Self {
        Self {
            host: WeakNode::new(host),
            window,
            core,
            clock,
            handlers: HashMap::new(),
            frame_requested: Rc::new(Cell::new(false)),
            timer: None,
        }
    }

    /// Event target for `listener`; `None` once the host is collected.
    fn target(&self, listener: Listener) -> Option<EventTarget> {
        match listener.target() {
            ListenerTarget::Host => self.host.get().map(EventTarget::from),
            ListenerTarget::Viewport => Some(self.window.clone().into()),
        }
    }

    fn remove_handler(&mut self, listener: Listener) -> bool {
        let Some(handler) = self.handlers.remove(&listener) else {
            return false;
        };
        if let Some(target) = self.target(listener) {
            let _ = target.remove_event_listener_with_callback(
                listener.event_name(),
                handler.as_ref().unchecked_ref(),
            );
        }
        true
    }
}

impl Viewport for DomViewport {
    fn subscribe(&mut self, listener: Listener) {
        if self.handlers.contains_key(&listener) {
            return;
        }
        let core = self.core.clone();
        let clock = self.clock;
        let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(input) = host_input_from_event(listener, &event) else {
                return;
            };
            run_with_weak(&core, clock, |core| {
                core.dispatch(input);
            });
        });

        let Some(target) = self.target(listener) else {
            return;
        };
        let options = AddEventListenerOptions::new();
        set_js(options.unchecked_ref::<Object>(), "passive", &JsValue::TRUE);
        let registered = target.add_event_listener_with_callback_and_add_event_listener_options(
            listener.event_name(),
            handler.as_ref().unchecked_ref(),
            &options,
        );
        match registered {
            Ok(()) => {
                self.handlers.insert(listener, handler);
            }
            Err(err) => tracing::warn!(
                message = "reveal.dom.listener",
                event = listener.event_name(),
                err = js_message(&err).as_str()
            ),
        }
    }

    fn unsubscribe(&mut self, listener: Listener) {
        self.remove_handler(listener);
    }

    fn request_frame(&mut self) {
        // One outstanding animation frame drains every queued task.
        if self.frame_requested.replace(true) {
            return;
        }
        let core = self.core.clone();
        let clock = self.clock;
        let flag = Rc::clone(&self.frame_requested);
        let callback = Closure::once_into_js(move || {
            flag.set(false);
            run_with_weak(&core, clock, |core| {
                core.animation_frame();
            });
        });
        if let Err(err) = self.window.request_animation_frame(callback.unchecked_ref()) {
            self.frame_requested.set(false);
            tracing::warn!(message = "reveal.dom.frame", err = js_message(&err).as_str());
        }
    }

    fn request_timer(&mut self, delay: Duration) {
        // Each request supersedes the previous timer, matching the debounce.
        if let Some((handle, _)) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let core = self.core.clone();
        let clock = self.clock;
        let callback = Closure::<dyn FnMut()>::new(move || {
            run_with_weak(&core, clock, |core| {
                core.timer_fired();
            });
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(handle) => self.timer = Some((handle, callback)),
            Err(err) => {
                tracing::warn!(message = "reveal.dom.timer", err = js_message(&err).as_str());
            }
        }
    }
}

impl Drop for DomViewport {
    fn drop(&mut self) {
        for listener in Listener::ALL {
            self.remove_handler(listener);
        }
        if let Some((handle, _)) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

// --- element ---------------------------------------------------------------

/// One `<reveal-component>` instance.
#[wasm_bindgen]
pub struct RevealElement {
    core: Rc<RefCell<DomCore>>,
    clock: SystemClock,
}

impl RevealElement {
    fn with_core<R>(&self, f: impl FnOnce(&mut DomCore) -> R) -> Result<R, JsError> {
        run_with_core(&self.core, self.clock, f)
    }

    fn read<R>(&self, f: impl FnOnce(&DomCore) -> R) -> Result<R, JsError> {
        let core = self.core.try_borrow().map_err(|_| JsError::new(BUSY))?;
        Ok(f(&core))
    }
}

#[wasm_bindgen]
impl RevealElement {
    /// Attach a widget to `host` (the custom element itself).
    #[wasm_bindgen(constructor)]
    pub fn new(host: HtmlElement) -> Result<RevealElement, JsError> {
        install_panic_hook();
        let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
        let config = WidgetConfig::default();
        let surface = DomSurface::new(&host, config.component_name.clone())
            .map_err(|err| JsError::new(&js_message(&err)))?;
        let clock = SystemClock::new();
        let core = Rc::new_cyclic(|weak: &Weak<RefCell<DomCore>>| {
            RefCell::new(HostCore::new(
                config,
                surface,
                DomViewport::new(&host, window, weak.clone(), clock),
            ))
        });
        Ok(Self { core, clock })
    }

    /// `connectedCallback`.
    pub fn connected(&self) -> Result<(), JsError> {
        let outcome = self.with_core(DomCore::connect)?;
        tracing::debug!(message = "reveal.dom.connected", ?outcome);
        Ok(())
    }

    /// `disconnectedCallback`.
    pub fn disconnected(&self) -> Result<(), JsError> {
        self.with_core(DomCore::disconnect)
    }

    /// `attributeChangedCallback`.
    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(
        &self,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Result<(), JsError> {
        self.with_core(|core| {
            core.attribute_changed(name, old_value.as_deref(), new_value.as_deref())
        })??;
        Ok(())
    }

    /// Feed one JSON-encoded pointer input (see `input_parser`).
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&self, json: &str) -> Result<bool, JsError> {
        self.with_core(|core| core.push_encoded_input(json))
    }

    #[wasm_bindgen(getter = openRatio)]
    pub fn open_ratio(&self) -> Result<f64, JsError> {
        self.read(|core| core.controller().open_ratio())
    }

    #[wasm_bindgen(setter = openRatio)]
    pub fn set_open_ratio(&self, ratio: f64) -> Result<(), JsError> {
        self.with_core(|core| {
            core.controller_mut().set_open_ratio(ratio);
        })
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> Result<f64, JsError> {
        self.read(|core| core.controller().x())
    }

    #[wasm_bindgen(setter)]
    pub fn set_x(&self, x: f64) -> Result<(), JsError> {
        self.with_core(|core| {
            core.controller_mut().set_pointer_x(x);
        })
    }

    #[wasm_bindgen(getter)]
    pub fn color(&self) -> Result<String, JsError> {
        self.read(|core| core.controller().color().to_owned())
    }

    #[wasm_bindgen(setter)]
    pub fn set_color(&self, color: String) -> Result<(), JsError> {
        self.with_core(|core| {
            core.controller_mut().set_color(color);
        })
    }

    #[wasm_bindgen(getter = elementWidth)]
    pub fn element_width(&self) -> Result<f64, JsError> {
        self.read(|core| core.controller().element_width())
    }

    #[wasm_bindgen(getter = dragElementWidth)]
    pub fn drag_element_width(&self) -> Result<f64, JsError> {
        self.read(|core| core.controller().drag_element_width())
    }

    #[wasm_bindgen(getter = isDragging)]
    pub fn is_dragging(&self) -> Result<bool, JsError> {
        self.read(|core| core.controller().is_dragging())
    }

    #[wasm_bindgen(getter)]
    pub fn rendered(&self) -> Result<bool, JsError> {
        self.read(|core| core.controller().is_rendered())
    }

    /// Formatted ratio for pointer position `x`, without moving the divider.
    #[wasm_bindgen(js_name = calculateOpenRatio)]
    pub fn calculate_open_ratio(&self, x: f64) -> Result<String, JsError> {
        self.read(|core| core.controller().ratio_label_for(x))
    }

    /// Re-measure now, bypassing the resize quiet period.
    #[wasm_bindgen(js_name = updateDimensions)]
    pub fn update_dimensions(&self) -> Result<(), JsError> {
        self.with_core(|core| core.controller_mut().refresh_dimensions())
    }

    #[wasm_bindgen(js_name = observedAttributes)]
    pub fn observed_attributes() -> Array {
        OBSERVED_ATTRIBUTES
            .iter()
            .map(|name| JsValue::from_str(name))
            .collect()
    }
}

/// Register the `<reveal-component>` custom element. Returns `false` when the
/// name is already taken.
#[wasm_bindgen]
pub fn define() -> bool {
    install_panic_hook();
    let factory = Closure::<dyn FnMut(HtmlElement) -> Result<JsValue, JsError>>::new(
        |host: HtmlElement| RevealElement::new(host).map(JsValue::from),
    );
    let defined = define_element(
        COMPONENT_NAME,
        &RevealElement::observed_attributes(),
        factory.as_ref().unchecked_ref(),
    );
    // The element class keeps calling the factory for every new instance.
    factory.forget();
    defined
}

// --- markup ----------------------------------------------------------------

struct DomTree {
    document: Document,
}

impl DomTree {
    fn new() -> Result<Self, JsError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsError::new("no document"))?;
        Ok(Self { document })
    }
}

fn host_error(err: JsValue) -> MarkupError {
    MarkupError::Host(js_message(&err))
}

fn select_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl MarkupTree for DomTree {
    type Node = Element;

    fn query_class(&self, root: &Element, class: &str) -> Vec<Element> {
        select_all(root, &format!(".{class}"))
    }

    fn images(&self, container: &Element) -> Vec<Element> {
        select_all(container, "img")
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, MarkupError> {
        self.document.create_element(tag).map_err(host_error)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<(), MarkupError> {
        node.set_attribute(name, value).map_err(host_error)
    }

    fn append_clone(&mut self, parent: &Element, child: &Element) -> Result<(), MarkupError> {
        let clone = child.clone_node_with_deep(true).map_err(host_error)?;
        parent.append_child(&clone).map_err(host_error)?;
        Ok(())
    }

    fn replace_with(&mut self, old: &Element, replacement: &Element) -> Result<(), MarkupError> {
        old.replace_with_with_node_1(replacement).map_err(host_error)
    }
}

/// Convert one two-image container into a widget element.
#[wasm_bindgen]
pub fn create(element: Element) -> Result<Element, JsError> {
    install_panic_hook();
    let mut tree = DomTree::new()?;
    Ok(markup::create(&mut tree, &element, &WidgetConfig::default())?)
}

/// Convert every `.reveal` container under `root`; returns the new widgets.
#[wasm_bindgen]
pub fn parse(root: Element) -> Result<Array, JsError> {
    install_panic_hook();
    let mut tree = DomTree::new()?;
    let widgets = markup::parse(&mut tree, &root, &WidgetConfig::default())?;
    Ok(widgets.iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    fn detached_host() -> HtmlElement {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.create_element("div").ok())
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .expect("detached div")
    }

    #[wasm_bindgen_test]
    fn weak_node_resolves_while_referenced() {
        let host = detached_host();
        let weak = WeakNode::new(&host);
        assert_eq!(weak.get().as_ref(), Some(&host));
    }

    #[wasm_bindgen_test]
    fn surface_reports_detached_host_and_still_renders() {
        let host = detached_host();
        let mut surface = DomSurface::new(&host, COMPONENT_NAME.to_owned()).expect("surface");
        surface.render_structure();
        assert_eq!(surface.host_box(), None);
        assert!(surface.divider_box().is_some());

        surface.emit(&Notification::new(
            reveal_widget::NotificationKind::Rendered,
            reveal_widget::NotificationDetail {
                element_width: 0.0,
                open_ratio: 50.0,
                rendered: true,
            },
        ));
        let outbox = surface.take_outbox().expect("host alive");
        assert_eq!(outbox.notifications.len(), 1);
        assert!(surface.pending.is_empty());
    }
}
