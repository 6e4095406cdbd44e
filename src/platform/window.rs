//! Browser window: location, session history, title and scroll position.

use url::Url;

/// A session history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Serialized state object, `None` for entries created by a plain load.
    pub state: Option<String>,
    pub url: Url,
}

pub trait Window {
    /// URL of the current history entry.
    fn location(&self) -> Url;

    /// Pushes a new history entry, discarding any forward entries.
    fn push_state(&mut self, state: String, url: Url);

    /// Steps back one entry and returns the state now current, as the
    /// following `popstate` event would carry it. `None` at the first entry.
    fn go_back(&mut self) -> Option<Option<String>>;

    fn set_title(&mut self, title: &str);

    fn scroll_to_top(&mut self);
}

/// Window with an in-memory history stack.
#[derive(Debug, Clone)]
pub struct MemoryWindow {
    current: HistoryEntry,
    back_stack: Vec<HistoryEntry>,
    forward_stack: Vec<HistoryEntry>,
    title: String,
    scroll_y: u32,
}

impl MemoryWindow {
    #[must_use]
    pub fn new(location: Url) -> Self {
        Self {
            current: HistoryEntry { state: None, url: location },
            back_stack: Vec::new(),
            forward_stack: Vec::new(),
            title: String::new(),
            scroll_y: 0,
        }
    }

    /// Steps back one entry and returns its state, as a `popstate` event
    /// would carry it. Returns `None` when already at the first entry.
    pub fn back(&mut self) -> Option<Option<String>> {
        let previous = self.back_stack.pop()?;
        let left = std::mem::replace(&mut self.current, previous);
        self.forward_stack.push(left);
        Some(self.current.state.clone())
    }

    /// Steps forward one entry and returns its state.
    pub fn forward(&mut self) -> Option<Option<String>> {
        let next = self.forward_stack.pop()?;
        let left = std::mem::replace(&mut self.current, next);
        self.back_stack.push(left);
        Some(self.current.state.clone())
    }

    #[must_use]
    pub const fn current(&self) -> &HistoryEntry {
        &self.current
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.back_stack.len() + 1 + self.forward_stack.len()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, y: u32) {
        self.scroll_y = y;
    }
}

impl Window for MemoryWindow {
    fn location(&self) -> Url {
        self.current.url.clone()
    }

    fn push_state(&mut self, state: String, url: Url) {
        self.forward_stack.clear();
        let left = std::mem::replace(&mut self.current, HistoryEntry { state: Some(state), url });
        self.back_stack.push(left);
    }

    fn go_back(&mut self) -> Option<Option<String>> {
        self.back()
    }

    fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    fn scroll_to_top(&mut self) {
        self.scroll_y = 0;
    }
}
