//! Abstract view of the page document.
//!
//! The services only ever see a [`Dom`], so they run the same against the
//! in-memory tree used by tests and the preview binary as against a real
//! browser binding.

pub mod layout;
mod memory;

pub use memory::{
    Element,
    MemoryDom,
};

/// Visual state class toggled on navigation links, sections, slots and options.
pub const ACTIVE_CLASS: &str = "active";

/// Flat translation key attribute.
pub const I18N_ATTR: &str = "data-i18n";
/// Dotted `parent.child` translation key attribute.
pub const I18N_NESTED_ATTR: &str = "data-i18n-nested";
/// Language code carried by a language selector option.
pub const LANG_ATTR: &str = "data-lang";
pub const LANG_OPTION_CLASS: &str = "lang-option";

pub const SCHEDULE_CONTAINER_CLASS: &str = "prayer-times";
pub const SLOT_CLASS: &str = "prayer-time";
pub const SLOT_NAME_CLASS: &str = "prayer-name";
pub const SLOT_HOUR_CLASS: &str = "prayer-hour";
pub const DATE_DISPLAY_CLASS: &str = "prayer-date";

/// Target section identifier carried by navigation elements.
pub const PAGE_ATTR: &str = "data-page";
pub const PAGE_CLASS: &str = "page";
/// Navigation elements whose active state follows the visible section.
pub const NAV_LINK_CLASSES: [&str; 2] = ["nav-link", "nav-item"];
pub const MAIN_NAV_ID: &str = "mainNav";
pub const NAV_TOGGLE_ID: &str = "navToggle";
pub const TAB_CLASS: &str = "tab";

/// Handle to an element of a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Element tree operations the page logic relies on.
///
/// Only structural reads and two kinds of writes (own text and class list)
/// are required; queries are provided on top of them and always return
/// elements in document order.
pub trait Dom {
    fn root(&self) -> NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Direct children in document order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn attr(&self, node: NodeId, name: &str) -> Option<String>;

    /// The element's own text.
    fn text(&self, node: NodeId) -> String;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool);

    /// Flips `class` and returns whether it is now present.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let enabled = !self.has_class(node, class);
        self.set_class(node, class, enabled);
        enabled
    }

    /// All descendants of `scope` in pre-order, excluding `scope` itself.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            result.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        result
    }

    fn query_class_within(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope).into_iter().filter(|&node| self.has_class(node, class)).collect()
    }

    fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.query_class_within(self.root(), class)
    }

    /// Every element carrying `name`, paired with the attribute value.
    fn query_attr(&self, name: &str) -> Vec<(NodeId, String)> {
        self.descendants(self.root())
            .into_iter()
            .filter_map(|node| self.attr(node, name).map(|value| (node, value)))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&node| self.attr(node, "id").is_some_and(|value| value == id))
    }

    /// Marks `selected` active and clears the state from every other node
    /// in `group`.
    fn activate_exclusive(&mut self, group: &[NodeId], selected: Option<NodeId>) {
        for &node in group {
            self.set_class(node, ACTIVE_CLASS, Some(node) == selected);
        }
    }
}
