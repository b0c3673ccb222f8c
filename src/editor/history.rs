//! History of submitted lines, navigated with Up/Down.

use std::collections::VecDeque;

/// Line history consulted by the editor.
///
/// The index moves over `0..=len`; `len` is the position past the newest
/// entry where the in-progress line lives.
pub trait History: Send {
    /// Record a submitted line and move to the end.
    fn add(&mut self, line: &str);
    /// Step back to an older entry. Returns `false` at the oldest.
    fn previous(&mut self) -> bool;
    /// Step forward to a newer entry or the end. Returns `false` at the end.
    fn next(&mut self) -> bool;
    /// Entry at the current index, `None` at the end.
    fn current(&self) -> Option<&str>;
    /// Move past the newest entry.
    fn move_to_end(&mut self);
    /// Number of entries.
    fn len(&self) -> usize;
    /// Check if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory history with a size cap.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: VecDeque<String>,
    index: usize,
    max_size: usize,
}

impl MemoryHistory {
    /// Default number of entries kept.
    pub const DEFAULT_MAX_SIZE: usize = 500;

    /// Create an empty history keeping at most `max_size` entries.
    pub const fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            index: 0,
            max_size,
        }
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_SIZE)
    }
}

impl History for MemoryHistory {
    fn add(&mut self, line: &str) {
        if self.max_size == 0 {
            return;
        }
        if self.entries.back().is_some_and(|last| last == line) {
            self.move_to_end();
            return;
        }
        while self.entries.len() >= self.max_size {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_owned());
        self.move_to_end();
    }

    fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    fn next(&mut self) -> bool {
        if self.index >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    fn move_to_end(&mut self) {
        self.index = self.entries.len();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
