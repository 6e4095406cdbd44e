//! Schedule fetching and rendering.

use thiserror::Error;

use super::{
    DailySchedule,
    Prayer,
    highlight,
};
use crate::config::SiteSettings;
use crate::dom::{
    DATE_DISPLAY_CLASS,
    Dom,
    SCHEDULE_CONTAINER_CLASS,
    SLOT_CLASS,
    SLOT_HOUR_CLASS,
};
use crate::platform::{
    Clock,
    FetchError,
    Fetcher,
};
use crate::types::ParseTimeError;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid schedule URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Failed to fetch prayer schedule: {0}")]
    Fetch(#[from] FetchError),
    #[error("Unexpected schedule response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
    #[error("Expected 6 prayer times, got {0}")]
    WrongLength(usize),
    #[error("Invalid {} time: {source}", .prayer.label())]
    InvalidTime {
        prayer: Prayer,
        #[source]
        source: ParseTimeError,
    },
}

/// Fetches today's schedule and keeps the next prayer highlighted.
///
/// Holds no page state, so it can be cloned into a detached fetch future
/// while the page keeps handling events.
#[derive(Debug, Clone)]
pub struct ScheduleHighlighter<F> {
    settings: SiteSettings,
    fetcher: F,
}

impl<F: Fetcher> ScheduleHighlighter<F> {
    pub const fn new(settings: SiteSettings, fetcher: F) -> Self {
        Self { settings, fetcher }
    }

    /// One request for the configured location.
    ///
    /// # Errors
    /// - Invalid endpoint URL
    /// - Transport failure or non-success status
    /// - Malformed response body
    pub async fn fetch_schedule(&self) -> Result<DailySchedule, ScheduleError> {
        let url = self.settings.schedule_url()?;
        let json = self.fetcher.fetch_json(&url).await?;
        let schedule = DailySchedule::from_json(json)?;

        tracing::info!(
            location = schedule.location.as_deref().unwrap_or("unknown"),
            "Loaded prayer schedule"
        );
        Ok(schedule)
    }

    /// Fetches and renders the schedule. On failure the page is left as it
    /// was and the error is logged before being returned.
    ///
    /// # Errors
    /// See [`Self::fetch_schedule`].
    pub async fn fetch_and_render_schedule<D: Dom>(
        &self,
        dom: &mut D,
    ) -> Result<DailySchedule, ScheduleError> {
        let result = self.fetch_schedule().await;
        render_fetched(dom, result)
    }

    /// Highlights the next prayer as of `clock`'s current time.
    pub fn update_active_highlight<D: Dom, C: Clock>(
        &self,
        dom: &mut D,
        clock: &C,
    ) -> Vec<Option<usize>> {
        let now = clock.now();
        let selected = highlight::update_active_highlight(dom, now);
        tracing::debug!(%now, ?selected, "Updated prayer highlight");
        selected
    }
}

/// Renders the outcome of a completed schedule fetch.
///
/// # Errors
/// Returns the fetch error unchanged after logging it.
pub fn render_fetched<D: Dom>(
    dom: &mut D,
    result: Result<DailySchedule, ScheduleError>,
) -> Result<DailySchedule, ScheduleError> {
    match result {
        Ok(schedule) => {
            let written = render_schedule(dom, &schedule);
            tracing::debug!(written, "Rendered prayer schedule");
            Ok(schedule)
        }
        Err(error) => {
            tracing::error!("{}", error);
            Err(error)
        }
    }
}

/// Writes time `i` into slot `i` of every schedule container and the date
/// into every date display. Returns the number of slots written.
///
/// Slots are matched by position only; their name labels are not consulted.
pub fn render_schedule<D: Dom>(dom: &mut D, schedule: &DailySchedule) -> usize {
    let mut written = 0;

    for container in dom.query_class(SCHEDULE_CONTAINER_CLASS) {
        let slots = dom.query_class_within(container, SLOT_CLASS);
        for (slot, point) in slots.into_iter().zip(&schedule.points) {
            let Some(hour) = dom.query_class_within(slot, SLOT_HOUR_CLASS).into_iter().next()
            else {
                continue;
            };
            dom.set_text(hour, &point.time.to_string());
            written += 1;
        }
    }

    if let Some(date) = &schedule.date {
        for display in dom.query_class(DATE_DISPLAY_CLASS) {
            dom.set_text(display, date);
        }
    }

    written
}
