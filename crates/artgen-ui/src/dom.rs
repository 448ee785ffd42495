//! Minimal in-memory document
//!
//! Stands in for the browser DOM: persistent page elements carrying classes
//! and inline styles, a body with its own class list and style, and
//! transient body children that only live while a download is triggered.

use indexmap::IndexMap;

use crate::download::{DownloadError, DownloadSurface};

/// Handle to a transient node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// A single element with classes, attributes and inline style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: IndexMap<String, String>,
    style: IndexMap<String, String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class unless already present
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_owned(), value.to_owned());
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Set an inline style property, keeping first-set order
    pub fn set_style(&mut self, property: &str, value: &str) {
        self.style.insert(property.to_owned(), value.to_owned());
    }
}

/// Clicked anchors kept for inspection
pub const CLICK_HISTORY: usize = 16;

/// The page as seen by the controller and the fallback patch
#[derive(Debug, Default)]
pub struct Document {
    body: Element,
    elements: Vec<Element>,
    transient: IndexMap<NodeId, Element>,
    clicked: Vec<Element>,
    next_node: u64,
}

impl Document {
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
            ..Self::default()
        }
    }

    /// Add a persistent element to the page
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub const fn body(&self) -> &Element {
        &self.body
    }

    pub const fn body_mut(&mut self) -> &mut Element {
        &mut self.body
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements carrying `class`, in document order
    pub fn elements_with_class_mut<'a>(&'a mut self, class: &'a str) -> impl Iterator<Item = &'a mut Element> + 'a {
        self.elements.iter_mut().filter(move |e| e.has_class(class))
    }

    /// Transient children currently attached to the body
    pub fn transient_children(&self) -> usize {
        self.transient.len()
    }

    /// Most recently clicked anchors, oldest first, at most [`CLICK_HISTORY`]
    pub fn clicked(&self) -> &[Element] {
        &self.clicked
    }
}

impl DownloadSurface for Document {
    fn append_anchor(&mut self, anchor: Element) -> NodeId {
        let id = NodeId::new(self.next_node);
        self.next_node += 1;
        self.transient.insert(id, anchor);
        id
    }

    fn click(&mut self, node: NodeId) -> Result<(), DownloadError> {
        let anchor = self.transient.get(&node).ok_or(DownloadError::Detached)?;
        if self.clicked.len() == CLICK_HISTORY {
            self.clicked.remove(0);
        }
        self.clicked.push(anchor.clone());
        Ok(())
    }

    fn remove(&mut self, node: NodeId) {
        self.transient.shift_remove(&node);
    }
}
