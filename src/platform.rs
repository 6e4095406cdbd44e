//! Environment seams: network, durable storage, browser window and clock.
//!
//! Every service receives these through generics instead of reaching for
//! globals, so the page logic can be exercised without a browser.

mod clock;
mod fetch;
mod storage;
mod window;

pub use clock::{
    Clock,
    LocalClock,
    ManualClock,
};
pub use fetch::{
    FetchError,
    Fetcher,
    ResourceFetcher,
    StaticFetcher,
};
pub use storage::{
    FileStore,
    MemoryStore,
    PreferenceStore,
    StorageError,
};
pub use window::{
    HistoryEntry,
    MemoryWindow,
    Window,
};
