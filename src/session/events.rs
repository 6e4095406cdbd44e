//! UI events and the page actions they resolve to.

use crate::dom::{
    Dom,
    LANG_ATTR,
    LANG_OPTION_CLASS,
    NAV_TOGGLE_ID,
    NodeId,
    PAGE_ATTR,
    TAB_CLASS,
};
use crate::i18n::LanguageCode;

/// Something the user did to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A click on an element, or on one of its descendants.
    Click(NodeId),
    /// The browser moved to another history entry carrying this state.
    PopState(Option<String>),
    /// The browser's back button.
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Navigate(String),
    SelectLanguage(LanguageCode),
    ToggleMenu,
    SelectTab(NodeId),
}

/// Resolves a click to the action of the nearest handling element, starting
/// at `target` and walking up through its ancestors.
///
/// Any element carrying a page target navigates, whatever its class, so
/// "view all" buttons and footer links behave like the navigation bar.
/// Language options with an unsupported code are ignored.
pub fn resolve_click<D: Dom>(dom: &D, target: NodeId) -> Option<PageAction> {
    let mut current = Some(target);

    while let Some(node) = current {
        if let Some(page) = dom.attr(node, PAGE_ATTR).filter(|page| !page.is_empty()) {
            return Some(PageAction::Navigate(page));
        }
        if dom.has_class(node, LANG_OPTION_CLASS) {
            return dom
                .attr(node, LANG_ATTR)
                .and_then(|code| code.parse().ok())
                .map(PageAction::SelectLanguage);
        }
        if dom.attr(node, "id").is_some_and(|id| id == NAV_TOGGLE_ID) {
            return Some(PageAction::ToggleMenu);
        }
        if dom.has_class(node, TAB_CLASS) {
            return Some(PageAction::SelectTab(node));
        }
        current = dom.parent(node);
    }

    None
}
