//! Small page widgets: the mobile menu and tab groups.

use crate::dom::{
    ACTIVE_CLASS,
    Dom,
    MAIN_NAV_ID,
    NodeId,
    TAB_CLASS,
};

/// Opens or closes the mobile menu. Returns whether it is now open, or
/// `None` when the page has no menu.
pub fn toggle_menu<D: Dom>(dom: &mut D) -> Option<bool> {
    let menu = dom.element_by_id(MAIN_NAV_ID)?;
    Some(dom.toggle_class(menu, ACTIVE_CLASS))
}

/// Makes `tab` the only active tab among its siblings.
pub fn select_tab<D: Dom>(dom: &mut D, tab: NodeId) {
    let siblings: Vec<NodeId> = match dom.parent(tab) {
        Some(parent) => {
            dom.children(parent).into_iter().filter(|&node| dom.has_class(node, TAB_CLASS)).collect()
        }
        None => vec![tab],
    };
    dom.activate_exclusive(&siblings, Some(tab));
}
