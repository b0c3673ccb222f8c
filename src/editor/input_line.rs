//! Input line: the editable text after the prompt.
//!
//! Cursor movement and deletion work on grapheme clusters so combined
//! characters and emoji are never split.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The line being typed, with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    /// Current text content.
    content: String,
    /// Cursor position as a byte offset on a grapheme boundary.
    cursor: usize,
}

impl InputLine {
    /// Create an empty input line.
    pub const fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
        }
    }

    /// Get the current text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position (byte offset).
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Display width of the text before the cursor.
    pub fn cursor_column(&self) -> usize {
        self.content[..self.cursor].width()
    }

    /// Replace the content, moving the cursor to the end.
    pub fn set(&mut self, content: &str) {
        content.clone_into(&mut self.content);
        self.cursor = self.content.len();
    }

    /// Take the content, leaving the line empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        self.content.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Replace `start..end` (byte offsets) and put the cursor after the
    /// replacement. Returns `false` if the range is not valid.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) -> bool {
        if start > end
            || end > self.content.len()
            || !self.content.is_char_boundary(start)
            || !self.content.is_char_boundary(end)
        {
            return false;
        }
        self.content.replace_range(start..end, text);
        self.cursor = start + text.len();
        true
    }

    fn previous_boundary(&self) -> Option<usize> {
        self.content[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.content[self.cursor..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor + g.len())
    }

    /// Delete the grapheme before the cursor. Returns `false` at the start.
    pub fn backspace(&mut self) -> bool {
        let Some(prev) = self.previous_boundary() else {
            return false;
        };
        self.content.replace_range(prev..self.cursor, "");
        self.cursor = prev;
        true
    }

    /// Delete the grapheme at the cursor. Returns `false` at the end.
    pub fn delete(&mut self) -> bool {
        let Some(next) = self.next_boundary() else {
            return false;
        };
        self.content.replace_range(self.cursor..next, "");
        true
    }

    /// Move the cursor one grapheme left. Returns `false` at the start.
    pub fn left(&mut self) -> bool {
        self.previous_boundary().is_some_and(|prev| {
            self.cursor = prev;
            true
        })
    }

    /// Move the cursor one grapheme right. Returns `false` at the end.
    pub fn right(&mut self) -> bool {
        self.next_boundary().is_some_and(|next| {
            self.cursor = next;
            true
        })
    }

    /// Move the cursor to the start.
    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn end(&mut self) {
        self.cursor = self.content.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_basic() {
        let mut input = InputLine::new();
        input.insert_char('H');
        input.insert_char('i');
        assert_eq!(input.content(), "Hi");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_input_backspace_at_start() {
        let mut input = InputLine::new();
        assert!(!input.backspace());
        input.set("Hello");
        assert!(input.backspace());
        assert_eq!(input.content(), "Hell");
    }

    #[test]
    fn test_input_cursor_movement() {
        let mut input = InputLine::new();
        input.set("Hello");

        assert!(input.left());
        assert_eq!(input.cursor(), 4);

        input.home();
        assert_eq!(input.cursor(), 0);
        assert!(!input.left());

        input.end();
        assert_eq!(input.cursor(), 5);
        assert!(!input.right());
    }

    #[test]
    fn test_input_graphemes_not_split() {
        let mut input = InputLine::new();
        input.set("ae\u{301}");
        assert!(input.left());
        assert_eq!(input.cursor(), 1);
        assert!(input.delete());
        assert_eq!(input.content(), "a");
    }

    #[test]
    fn test_input_cursor_column_wide_chars() {
        let mut input = InputLine::new();
        input.set("日本");
        assert_eq!(input.cursor_column(), 4);
    }

    #[test]
    fn test_input_replace_range() {
        let mut input = InputLine::new();
        input.set("puts Str");
        assert!(input.replace_range(5, 8, "String"));
        assert_eq!(input.content(), "puts String");
        assert_eq!(input.cursor(), 11);
        assert!(!input.replace_range(5, 40, "x"));
    }
}
