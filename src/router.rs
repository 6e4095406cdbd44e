//! Section switching with navigation, history, URL and title sync.

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;
use url::Url;

use crate::config::SiteSettings;
use crate::dom::layout::page_label;
use crate::dom::{
    ACTIVE_CLASS,
    Dom,
    MAIN_NAV_ID,
    NAV_LINK_CLASSES,
    PAGE_ATTR,
    PAGE_CLASS,
};
use crate::platform::Window;

#[derive(Error, Debug)]
pub enum RouterError {
    /// The page is not listed in the settings or has no section
    #[error("Unknown page '{0}'")]
    UnknownPage(String),
    #[error("Failed to encode history state: {0}")]
    State(#[from] serde_json::Error),
}

/// State object stored with each history entry pushed by the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub page: String,
}

impl HistoryState {
    #[must_use]
    pub fn new(page: impl Into<String>) -> Self {
        Self { page: page.into() }
    }

    /// # Errors
    /// Returns error if serialization fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// `None` for anything that is not a state written by [`Self::encode`].
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Shows one section at a time and keeps the rest of the page in step.
#[derive(Debug, Clone)]
pub struct PageRouter {
    settings: SiteSettings,
    current: Option<String>,
}

impl PageRouter {
    #[must_use]
    pub const fn new(settings: SiteSettings) -> Self {
        Self { settings, current: None }
    }

    /// Identifier of the visible section, once one has been shown.
    #[must_use]
    pub fn current_page(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Pages listed in the settings. Only these can be shown, restored from
    /// history or opened from the URL.
    #[must_use]
    pub fn is_known(&self, page: &str) -> bool {
        self.settings.pages.iter().any(|known| known == page)
    }

    /// Shows `page` and records it as a new history entry.
    ///
    /// # Errors
    /// Returns [`RouterError::UnknownPage`] without touching the page or the
    /// history when `page` is not a known page.
    pub fn switch_page<D: Dom, W: Window>(
        &mut self,
        dom: &mut D,
        window: &mut W,
        page: &str,
    ) -> Result<(), RouterError> {
        let state = HistoryState::new(page).encode()?;
        self.show(dom, window, page)?;

        let url = self.page_url(window.location(), page);
        tracing::debug!(%url, "Pushing history entry");
        window.push_state(state, url);
        Ok(())
    }

    /// Restores the page recorded in a history entry. Entries without a
    /// readable state, or naming a page that no longer exists, show the home
    /// page. Returns the page shown.
    pub fn handle_pop_state<D: Dom, W: Window>(
        &mut self,
        dom: &mut D,
        window: &mut W,
        state: Option<&str>,
    ) -> String {
        let page = state
            .and_then(HistoryState::decode)
            .map(|state| state.page)
            .filter(|page| self.is_known(page))
            .unwrap_or_else(|| self.settings.home_page.clone());

        if let Err(error) = self.show(dom, window, &page) {
            tracing::warn!("Failed to restore page '{}': {}", page, error);
        }
        page
    }

    /// Page selected by the location's query parameter, else the home page.
    #[must_use]
    pub fn initial_page<W: Window>(&self, window: &W) -> String {
        let param = self.settings.page_query_param.as_str();
        window
            .location()
            .query_pairs()
            .find(|(name, _)| name == param)
            .map(|(_, value)| value.into_owned())
            .filter(|page| self.is_known(page))
            .unwrap_or_else(|| self.settings.home_page.clone())
    }

    /// Shows `page` without adding a history entry.
    ///
    /// # Errors
    /// Returns [`RouterError::UnknownPage`] if `page` is not listed in the
    /// settings or no section has that id.
    pub fn show<D: Dom, W: Window>(
        &mut self,
        dom: &mut D,
        window: &mut W,
        page: &str,
    ) -> Result<(), RouterError> {
        if !self.is_known(page) {
            return Err(RouterError::UnknownPage(page.to_string()));
        }

        let sections = dom.query_class(PAGE_CLASS);
        let target = sections
            .iter()
            .copied()
            .find(|&node| dom.attr(node, "id").is_some_and(|id| id == page))
            .ok_or_else(|| RouterError::UnknownPage(page.to_string()))?;

        dom.activate_exclusive(&sections, Some(target));

        for class in NAV_LINK_CLASSES {
            for link in dom.query_class(class) {
                let matches = dom.attr(link, PAGE_ATTR).is_some_and(|target| target == page);
                dom.set_class(link, ACTIVE_CLASS, matches);
            }
        }

        if let Some(menu) = dom.element_by_id(MAIN_NAV_ID) {
            dom.set_class(menu, ACTIVE_CLASS, false);
        }

        window.set_title(&self.title_for(page));
        window.scroll_to_top();

        self.current = Some(page.to_string());
        tracing::info!(page, "Switched page");
        Ok(())
    }

    /// `"<Page Label> | <site title>"`
    #[must_use]
    pub fn title_for(&self, page: &str) -> String {
        format!("{} | {}", page_label(page), self.settings.site_title)
    }

    fn page_url(&self, mut location: Url, page: &str) -> Url {
        let param = self.settings.page_query_param.as_str();
        let others: Vec<(String, String)> = location
            .query_pairs()
            .filter(|(name, _)| name != param)
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();

        location.query_pairs_mut().clear().extend_pairs(others).append_pair(param, page);
        location.set_fragment(None);
        location
    }
}
