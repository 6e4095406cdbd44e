//! One page load: owns the services and the environment seams, dispatches
//! UI events and drives the schedule timer.

mod events;
mod widgets;

pub use events::{
    PageAction,
    UiEvent,
    resolve_click,
};
pub use widgets::{
    select_tab,
    toggle_menu,
};

use tokio::sync::mpsc;
use tokio::time::{
    self,
    Instant,
    MissedTickBehavior,
};

use crate::config::SiteSettings;
use crate::dom::Dom;
use crate::i18n::{
    LanguageCode,
    TranslationService,
};
use crate::platform::{
    Clock,
    Fetcher,
    PreferenceStore,
    Window,
};
use crate::router::PageRouter;
use crate::schedule::{
    DailySchedule,
    ScheduleHighlighter,
    render_fetched,
};

/// The page's runtime state.
///
/// Event handling is sequential: each event is handled to completion,
/// including any translation fetch it triggers, before the next one is
/// read.
#[derive(Debug)]
pub struct PageSession<D, W, F, S, C> {
    settings: SiteSettings,
    dom: D,
    window: W,
    clock: C,
    translations: TranslationService<F, S>,
    highlighter: ScheduleHighlighter<F>,
    router: PageRouter,
    schedule: Option<DailySchedule>,
}

impl<D, W, F, S, C> PageSession<D, W, F, S, C>
where
    D: Dom,
    W: Window,
    F: Fetcher + Clone,
    S: PreferenceStore,
    C: Clock,
{
    pub fn new(settings: SiteSettings, dom: D, window: W, fetcher: F, store: S, clock: C) -> Self {
        Self {
            translations: TranslationService::new(settings.clone(), fetcher.clone(), store),
            highlighter: ScheduleHighlighter::new(settings.clone(), fetcher),
            router: PageRouter::new(settings.clone()),
            settings,
            dom,
            window,
            clock,
            schedule: None,
        }
    }

    /// Applies the initial language and shows the page the URL asks for.
    pub async fn start(&mut self) {
        let language = self.translations.initial_language();
        self.select_language(language).await;

        let page = self.router.initial_page(&self.window);
        if let Err(error) = self.router.show(&mut self.dom, &mut self.window, &page) {
            tracing::warn!("Failed to show initial page '{}': {}", page, error);
        }
    }

    /// Runs the page until `events` closes.
    ///
    /// The schedule is fetched once in the background while events are
    /// handled. The highlight first runs after the configured delay and then
    /// at every interval; a tick that fires before the schedule arrives
    /// highlights the placeholder slots and the next one corrects it.
    pub async fn run(&mut self, mut events: mpsc::Receiver<UiEvent>) {
        self.start().await;

        let highlighter = self.highlighter.clone();
        let fetch = async move { highlighter.fetch_schedule().await };
        tokio::pin!(fetch);
        let mut fetched = false;

        let first_tick = Instant::now() + self.settings.initial_highlight_delay();
        let mut ticker = time::interval_at(first_tick, self.settings.highlight_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                result = &mut fetch, if !fetched => {
                    fetched = true;
                    if let Ok(schedule) = render_fetched(&mut self.dom, result) {
                        self.schedule = Some(schedule);
                    }
                }
                _ = ticker.tick() => {
                    self.tick();
                }
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => break,
                },
            }
        }

        tracing::debug!("Event channel closed; session ended");
    }

    /// Fetches and renders the schedule in place, outside of [`Self::run`].
    ///
    /// Returns `None` when the fetch fails. A schedule rendered earlier stays
    /// on the page and in [`Self::schedule`].
    pub async fn load_schedule(&mut self) -> Option<&DailySchedule> {
        match self.highlighter.fetch_and_render_schedule(&mut self.dom).await {
            Ok(schedule) => Some(&*self.schedule.insert(schedule)),
            Err(_) => None,
        }
    }

    /// Recomputes the next-prayer highlight.
    pub fn tick(&mut self) -> Vec<Option<usize>> {
        self.highlighter.update_active_highlight(&mut self.dom, &self.clock)
    }

    pub async fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Click(node) => match resolve_click(&self.dom, node) {
                Some(action) => self.handle_action(action).await,
                None => tracing::trace!(node = node.index(), "Click without handler"),
            },
            UiEvent::PopState(state) => {
                self.router.handle_pop_state(&mut self.dom, &mut self.window, state.as_deref());
            }
            UiEvent::Back => match self.window.go_back() {
                Some(state) => {
                    self.router.handle_pop_state(&mut self.dom, &mut self.window, state.as_deref());
                }
                None => tracing::debug!("Already at the first history entry"),
            },
        }
    }

    pub async fn handle_action(&mut self, action: PageAction) {
        tracing::debug!(?action, "Handling page action");
        match action {
            PageAction::Navigate(page) => {
                if let Err(error) = self.router.switch_page(&mut self.dom, &mut self.window, &page) {
                    tracing::warn!("{}", error);
                }
            }
            PageAction::SelectLanguage(language) => self.select_language(language).await,
            PageAction::ToggleMenu => {
                if let Some(open) = toggle_menu(&mut self.dom) {
                    tracing::info!(open, "Toggled menu");
                }
            }
            PageAction::SelectTab(tab) => {
                select_tab(&mut self.dom, tab);
                tracing::info!(tab = self.dom.attr(tab, "id").as_deref(), "Selected tab");
            }
        }
    }

    async fn select_language(&mut self, language: LanguageCode) {
        match self.translations.apply_translations(&mut self.dom, language).await {
            Ok(shown) if shown == language => tracing::info!(%language, "Language applied"),
            Ok(shown) => tracing::info!(%language, %shown, "Language applied with fallback texts"),
            Err(error) => tracing::error!("{}", error),
        }
    }

    #[must_use]
    pub const fn dom(&self) -> &D {
        &self.dom
    }

    #[must_use]
    pub const fn window(&self) -> &W {
        &self.window
    }

    #[must_use]
    pub const fn translations(&self) -> &TranslationService<F, S> {
        &self.translations
    }

    #[must_use]
    pub const fn router(&self) -> &PageRouter {
        &self.router
    }

    #[must_use]
    pub const fn schedule(&self) -> Option<&DailySchedule> {
        self.schedule.as_ref()
    }
}
