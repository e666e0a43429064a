#![forbid(unsafe_code)]

//! Recording fakes for the host seams.
//!
//! Available under `cfg(test)` and with the `test-helpers` feature.

use core::time::Duration;
use std::collections::BTreeMap;

use reveal_core::BoundingBox;

use crate::host::{Surface, Viewport};
use crate::listener::{Listener, ListenerSet};
use crate::markup::{MarkupError, MarkupTree};
use crate::notification::{Notification, NotificationKind};

/// [`Surface`] that records every write.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    /// Reported widget box; set to `None` to simulate detachment.
    pub host: Option<BoundingBox>,
    /// Reported divider box; `None` until the structure is rendered.
    pub divider: Option<BoundingBox>,
    divider_template: Option<BoundingBox>,
    pub render_count: usize,
    pub applied_ratios: Vec<String>,
    pub accents: Vec<String>,
    pub notifications: Vec<Notification>,
}

impl RecordingSurface {
    /// Surface whose divider (of `divider_width`) appears once rendered.
    #[must_use]
    pub fn new(host: BoundingBox, divider_width: f64) -> Self {
        Self {
            host: Some(host),
            divider: None,
            divider_template: Some(BoundingBox::new(
                host.left,
                host.top,
                divider_width,
                host.height,
            )),
            ..Self::default()
        }
    }

    /// Notification kinds in emission order.
    #[must_use]
    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.notifications.iter().map(|n| n.kind).collect()
    }

    #[must_use]
    pub fn count(&self, kind: NotificationKind) -> usize {
        self.notifications.iter().filter(|n| n.kind == kind).count()
    }

    #[must_use]
    pub fn last(&self, kind: NotificationKind) -> Option<&Notification> {
        self.notifications.iter().rev().find(|n| n.kind == kind)
    }

    /// Forget recorded writes and notifications (the render count stays).
    pub fn clear_log(&mut self) {
        self.applied_ratios.clear();
        self.accents.clear();
        self.notifications.clear();
    }
}

impl Surface for RecordingSurface {
    fn render_structure(&mut self) {
        self.render_count += 1;
        if self.divider.is_none() {
            self.divider = self.divider_template;
        }
    }

    fn host_box(&self) -> Option<BoundingBox> {
        self.host
    }

    fn divider_box(&self) -> Option<BoundingBox> {
        self.divider
    }

    fn apply_open_ratio(&mut self, width: &str) {
        self.applied_ratios.push(width.to_owned());
    }

    fn apply_accent(&mut self, color: &str) {
        self.accents.push(color.to_owned());
    }

    fn emit(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}

/// [`Viewport`] that tracks subscriptions and wake-up requests.
#[derive(Debug, Clone, Default)]
pub struct FakeViewport {
    pub subscribed: ListenerSet,
    pub subscribe_calls: usize,
    pub unsubscribe_calls: usize,
    /// Subscriptions for a listener that was already subscribed.
    pub duplicate_subscriptions: usize,
    /// Unsubscriptions for a listener that was not subscribed.
    pub unknown_unsubscriptions: usize,
    pub frame_requests: usize,
    pub timer_requests: Vec<Duration>,
}

impl Viewport for FakeViewport {
    fn subscribe(&mut self, listener: Listener) {
        self.subscribe_calls += 1;
        if self.subscribed.contains(listener.flag()) {
            self.duplicate_subscriptions += 1;
        }
        self.subscribed.insert(listener.flag());
    }

    fn unsubscribe(&mut self, listener: Listener) {
        self.unsubscribe_calls += 1;
        if !self.subscribed.contains(listener.flag()) {
            self.unknown_unsubscriptions += 1;
        }
        self.subscribed.remove(listener.flag());
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }

    fn request_timer(&mut self, delay: Duration) {
        self.timer_requests.push(delay);
    }
}

#[derive(Debug, Clone)]
struct FakeElement {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    children: Vec<usize>,
    parent: Option<usize>,
}

/// Arena-backed document for [`MarkupTree`] tests. Nodes are indices.
#[derive(Debug, Clone)]
pub struct FakeDocument {
    nodes: Vec<FakeElement>,
}

impl Default for FakeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDocument {
    /// Document with a single `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![FakeElement {
                tag: "body".to_owned(),
                classes: Vec::new(),
                attrs: BTreeMap::new(),
                children: Vec::new(),
                parent: None,
            }],
        }
    }

    #[must_use]
    pub const fn root(&self) -> usize {
        0
    }

    /// Append a new element under `parent`.
    pub fn add_element(&mut self, parent: usize, tag: &str, classes: &[&str]) -> usize {
        let id = self.push_detached(tag);
        self.nodes[id].classes = classes.iter().map(|c| (*c).to_owned()).collect();
        self.nodes[id].parent = Some(parent);
        self.nodes[parent].children.push(id);
        id
    }

    pub fn set_attr(&mut self, node: usize, name: &str, value: &str) {
        self.nodes[node]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    #[must_use]
    pub fn attr(&self, node: usize, name: &str) -> Option<&str> {
        self.nodes[node].attrs.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn tag(&self, node: usize) -> &str {
        &self.nodes[node].tag
    }

    #[must_use]
    pub fn children(&self, node: usize) -> Vec<usize> {
        self.nodes[node].children.clone()
    }

    #[must_use]
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.nodes[node].parent
    }

    fn push_detached(&mut self, tag: &str) -> usize {
        self.nodes.push(FakeElement {
            tag: tag.to_owned(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
            parent: None,
        });
        self.nodes.len() - 1
    }

    fn descendants(&self, node: usize, out: &mut Vec<usize>) {
        for &child in &self.nodes[node].children {
            out.push(child);
            self.descendants(child, out);
        }
    }

    fn deep_clone(&mut self, node: usize) -> usize {
        let source = self.nodes[node].clone();
        let id = self.push_detached(&source.tag);
        self.nodes[id].classes = source.classes;
        self.nodes[id].attrs = source.attrs;
        for child in source.children {
            let cloned = self.deep_clone(child);
            self.nodes[cloned].parent = Some(id);
            self.nodes[id].children.push(cloned);
        }
        id
    }
}

impl MarkupTree for FakeDocument {
    type Node = usize;

    fn query_class(&self, root: &usize, class: &str) -> Vec<usize> {
        let mut all = Vec::new();
        self.descendants(*root, &mut all);
        all.retain(|&node| self.nodes[node].classes.iter().any(|c| c == class));
        all
    }

    fn images(&self, container: &usize) -> Vec<usize> {
        let mut all = Vec::new();
        self.descendants(*container, &mut all);
        all.retain(|&node| self.nodes[node].tag == "img");
        all
    }

    fn create_element(&mut self, tag: &str) -> Result<usize, MarkupError> {
        Ok(self.push_detached(tag))
    }

    fn set_attribute(&mut self, node: &usize, name: &str, value: &str) -> Result<(), MarkupError> {
        self.set_attr(*node, name, value);
        Ok(())
    }

    fn append_clone(&mut self, parent: &usize, child: &usize) -> Result<(), MarkupError> {
        let cloned = self.deep_clone(*child);
        self.nodes[cloned].parent = Some(*parent);
        self.nodes[*parent].children.push(cloned);
        Ok(())
    }

    fn replace_with(&mut self, old: &usize, replacement: &usize) -> Result<(), MarkupError> {
        // Detached nodes have nothing to replace, same as the DOM.
        let Some(parent) = self.nodes[*old].parent else {
            return Ok(());
        };
        let Some(index) = self.nodes[parent].children.iter().position(|c| c == old) else {
            return Err(MarkupError::Host(format!(
                "node {old} missing from its parent"
            )));
        };
        self.nodes[parent].children[index] = *replacement;
        self.nodes[*replacement].parent = Some(parent);
        self.nodes[*old].parent = None;
        Ok(())
    }
}
