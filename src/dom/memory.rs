//! In-memory element tree.

use std::collections::BTreeMap;

use super::{
    Dom,
    NodeId,
};

/// An element description used to build a [`MemoryDom`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Arena node: the element plus its links.
#[derive(Debug, Clone)]
struct Node {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A [`Dom`] backed by an arena of nodes, rooted at a `body` element.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![Node { element: Element::new("body"), parent: None, children: vec![] }] }
    }

    /// Appends `element` as the last child of `parent`.
    ///
    /// An unknown `parent` leaves the new node detached.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let parent = self.node_mut(parent).map(|node| {
            node.children.push(id);
            parent
        });
        self.nodes.push(Node { element, parent, children: Vec::new() });
        id
    }

    /// Number of elements, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.element.tag())
    }

    /// Visible section identifiers, i.e. `page` elements carrying `active`.
    #[must_use]
    pub fn visible_sections(&self) -> Vec<String> {
        self.query_class(super::PAGE_CLASS)
            .into_iter()
            .filter(|&node| self.has_class(node, super::ACTIVE_CLASS))
            .filter_map(|node| self.attr(node, "id"))
            .collect()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }
}

impl Dom for MemoryDom {
    fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node).and_then(|n| n.element.attrs.get(name).cloned())
    }

    fn text(&self, node: NodeId) -> String {
        self.node(node).map(|n| n.element.text.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.node_mut(node) {
            text.clone_into(&mut n.element.text);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.element.classes.iter().any(|c| c == class))
    }

    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool) {
        let Some(n) = self.node_mut(node) else {
            return;
        };
        let classes = &mut n.element.classes;
        let present = classes.iter().any(|c| c == class);
        if enabled && !present {
            classes.push(class.to_string());
        } else if !enabled && present {
            classes.retain(|c| c != class);
        }
    }
}
