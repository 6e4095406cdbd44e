//! Daily prayer schedule: fetching, rendering and next-prayer highlighting.

mod highlight;
mod highlighter;
mod prayer;

pub use highlight::{
    next_slot_index,
    slot_minutes,
    update_active_highlight,
};
pub use highlighter::{
    ScheduleError,
    ScheduleHighlighter,
    render_fetched,
    render_schedule,
};
pub use prayer::{
    DailySchedule,
    Prayer,
    TimePoint,
};
