#![forbid(unsafe_code)]

//! Converting existing markup into widgets.
//!
//! A container holding two images becomes one widget element: the first image
//! is assigned to the `before` slot, the second to the `after` slot, both are
//! cloned into a fresh widget element, and the widget replaces the container
//! in the document.
//!
//! Misuse fails loudly at the call site: a container with fewer than two
//! images is a content error, reported as [`MarkupError::MissingImage`]
//! before anything in the document changes.

use crate::config::WidgetConfig;

/// Slot receiving the first image.
pub const BEFORE_SLOT: &str = "before";

/// Slot receiving the second image.
pub const AFTER_SLOT: &str = "after";

/// Errors from markup conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// Container holds fewer than two images.
    MissingImage { found: usize },
    /// The document host rejected an operation.
    Host(String),
}

impl core::fmt::Display for MarkupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingImage { found } => {
                write!(f, "expected two images in container, found {found}")
            }
            Self::Host(msg) => write!(f, "document host error: {msg}"),
        }
    }
}

impl std::error::Error for MarkupError {}

/// Document operations needed for conversion.
pub trait MarkupTree {
    type Node: Clone;

    /// Descendants of `root` carrying `class`, in document order.
    fn query_class(&self, root: &Self::Node, class: &str) -> Vec<Self::Node>;

    /// Image descendants of `container`, in document order.
    fn images(&self, container: &Self::Node) -> Vec<Self::Node>;

    fn create_element(&mut self, tag: &str) -> Result<Self::Node, MarkupError>;

    fn set_attribute(
        &mut self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), MarkupError>;

    /// Append a deep clone of `child` to `parent`.
    fn append_clone(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), MarkupError>;

    /// Put `replacement` where `old` is.
    fn replace_with(
        &mut self,
        old: &Self::Node,
        replacement: &Self::Node,
    ) -> Result<(), MarkupError>;
}

/// Convert one container into a widget element and return it.
///
/// Extra images beyond the second are left out of the widget.
pub fn create<T: MarkupTree>(
    tree: &mut T,
    container: &T::Node,
    config: &WidgetConfig,
) -> Result<T::Node, MarkupError> {
    let images = tree.images(container);
    let (before, after) = match images.as_slice() {
        [before, after, ..] => (before.clone(), after.clone()),
        _ => {
            return Err(MarkupError::MissingImage {
                found: images.len(),
            });
        }
    };

    tree.set_attribute(&before, "slot", BEFORE_SLOT)?;
    tree.set_attribute(&after, "slot", AFTER_SLOT)?;

    let widget = tree.create_element(&config.component_name)?;
    tree.append_clone(&widget, &before)?;
    tree.append_clone(&widget, &after)?;
    tree.replace_with(container, &widget)?;

    tracing::debug!(
        message = "reveal.markup.create",
        component = config.component_name.as_str(),
        images = images.len()
    );
    Ok(widget)
}

/// Convert every marked container under `root`, in document order.
///
/// Stops at the first failing container; containers converted before it stay
/// converted.
pub fn parse<T: MarkupTree>(
    tree: &mut T,
    root: &T::Node,
    config: &WidgetConfig,
) -> Result<Vec<T::Node>, MarkupError> {
    let containers = tree.query_class(root, &config.marker_class);
    containers
        .iter()
        .map(|container| create(tree, container, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDocument;
    use pretty_assertions::assert_eq;

    fn gallery(doc: &mut FakeDocument, images: usize) -> usize {
        let body = doc.root();
        let container = doc.add_element(body, "div", &["reveal"]);
        for index in 0..images {
            let img = doc.add_element(container, "img", &[]);
            doc.set_attr(img, "src", &format!("/img/{index}.jpg"));
        }
        container
    }

    #[test]
    fn create_slots_clones_and_replaces() {
        let mut doc = FakeDocument::new();
        let container = gallery(&mut doc, 2);
        let config = WidgetConfig::default();

        let widget = create(&mut doc, &container, &config).expect("two images convert");

        assert_eq!(doc.tag(widget), "reveal-component");
        assert_eq!(doc.children(doc.root()), vec![widget]);
        assert_eq!(doc.parent(container), None);

        let slotted: Vec<_> = doc
            .children(widget)
            .into_iter()
            .map(|child| {
                (
                    doc.tag(child).to_owned(),
                    doc.attr(child, "slot").map(str::to_owned),
                    doc.attr(child, "src").map(str::to_owned),
                )
            })
            .collect();
        assert_eq!(
            slotted,
            vec![
                (
                    "img".to_owned(),
                    Some("before".to_owned()),
                    Some("/img/0.jpg".to_owned())
                ),
                (
                    "img".to_owned(),
                    Some("after".to_owned()),
                    Some("/img/1.jpg".to_owned())
                ),
            ]
        );
    }

    #[test]
    fn create_finds_nested_images() {
        let mut doc = FakeDocument::new();
        let body = doc.root();
        let container = doc.add_element(body, "figure", &["reveal"]);
        let picture = doc.add_element(container, "picture", &[]);
        doc.add_element(picture, "img", &[]);
        doc.add_element(container, "img", &[]);

        let widget = create(&mut doc, &container, &WidgetConfig::default()).expect("converts");
        assert_eq!(doc.children(widget).len(), 2);
    }

    #[test]
    fn create_uses_first_two_images() {
        let mut doc = FakeDocument::new();
        let container = gallery(&mut doc, 3);
        let widget = create(&mut doc, &container, &WidgetConfig::default()).expect("converts");
        assert_eq!(doc.children(widget).len(), 2);
    }

    #[test]
    fn create_fails_loudly_without_second_image() {
        let mut doc = FakeDocument::new();
        let container = gallery(&mut doc, 1);
        let err = create(&mut doc, &container, &WidgetConfig::default())
            .expect_err("one image is a content error");
        assert_eq!(err, MarkupError::MissingImage { found: 1 });
        assert_eq!(
            err.to_string(),
            "expected two images in container, found 1"
        );
        // Document untouched.
        assert_eq!(doc.children(doc.root()), vec![container]);
    }

    #[test]
    fn parse_converts_in_document_order() {
        let mut doc = FakeDocument::new();
        let first = gallery(&mut doc, 2);
        let body = doc.root();
        doc.add_element(body, "div", &["other"]);
        let second = gallery(&mut doc, 2);

        let root = doc.root();
        let widgets = parse(&mut doc, &root, &WidgetConfig::default()).expect("all convert");
        assert_eq!(widgets.len(), 2);
        let children = doc.children(doc.root());
        assert_eq!(children[0], widgets[0]);
        assert_eq!(children[2], widgets[1]);
        assert_eq!(doc.parent(first), None);
        assert_eq!(doc.parent(second), None);
    }

    #[test]
    fn parse_honors_marker_class() {
        let mut doc = FakeDocument::new();
        let body = doc.root();
        let custom = doc.add_element(body, "div", &["compare"]);
        doc.add_element(custom, "img", &[]);
        doc.add_element(custom, "img", &[]);
        gallery(&mut doc, 2);

        let config = WidgetConfig::default().with_marker_class("compare");
        let root = doc.root();
        let widgets = parse(&mut doc, &root, &config).expect("converts");
        assert_eq!(widgets.len(), 1);
        assert_eq!(doc.children(doc.root())[0], widgets[0]);
    }

    #[test]
    fn parse_stops_at_first_bad_container() {
        let mut doc = FakeDocument::new();
        gallery(&mut doc, 2);
        gallery(&mut doc, 0);
        let third = gallery(&mut doc, 2);

        let root = doc.root();
        let err = parse(&mut doc, &root, &WidgetConfig::default())
            .expect_err("second container is empty");
        assert_eq!(err, MarkupError::MissingImage { found: 0 });
        assert_eq!(doc.tag(doc.children(doc.root())[0]), "reveal-component");
        assert_eq!(doc.parent(third), Some(doc.root()));
    }
}
