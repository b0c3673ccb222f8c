//! Thread roles: which thread is the single-threaded UI thread.
//!
//! Blocking calls must never run on the UI thread. The role is passed in
//! explicitly at construction instead of being queried from a global.

use std::fmt;
use std::thread::{self, ThreadId};

/// Answers whether the calling thread is the UI thread.
pub trait ThreadRole: Send + Sync + fmt::Debug {
    /// Check if the current thread is the UI thread.
    fn is_ui_thread(&self) -> bool;
}

/// The UI thread identified by its [`ThreadId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiThread {
    id: ThreadId,
}

impl UiThread {
    /// Mark the calling thread as the UI thread.
    pub fn current() -> Self {
        Self {
            id: thread::current().id(),
        }
    }

    /// Mark the thread with the given id as the UI thread.
    pub const fn new(id: ThreadId) -> Self {
        Self { id }
    }
}

impl ThreadRole for UiThread {
    fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.id
    }
}

/// No UI thread at all; every thread may block.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl ThreadRole for Headless {
    fn is_ui_thread(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_thread_only_matches_its_thread() {
        let role = UiThread::current();
        assert!(role.is_ui_thread());

        let other = thread::spawn(move || role.is_ui_thread()).join().unwrap();
        assert!(!other);
    }

    #[test]
    fn test_headless_never_ui() {
        assert!(!Headless.is_ui_thread());
    }
}
