//! Transcript: the styled, size-bounded record of a console session.
//!
//! Text is stored as runs of equal style. When the character limit is
//! exceeded, the oldest text is cut from the front.

use std::collections::VecDeque;

/// How a piece of transcript text should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Banner shown at startup.
    Banner,
    /// A prompt printed by `read_line`.
    Prompt,
    /// Text typed by the user.
    Input,
    /// Program output.
    Output,
    /// Program output that starts with the result prefix.
    Result,
}

/// A run of text in one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The text of the run.
    pub text: String,
    /// Display style of the run.
    pub style: Style,
    chars: usize,
}

impl Segment {
    fn new(text: &str, style: Style) -> Self {
        Self {
            text: text.to_owned(),
            style,
            chars: text.chars().count(),
        }
    }
}

/// Styled transcript with a character limit.
#[derive(Debug, Clone)]
pub struct Transcript {
    segments: VecDeque<Segment>,
    /// Total characters across all segments.
    chars: usize,
    /// Maximum characters retained.
    max_chars: usize,
}

impl Transcript {
    /// Create an empty transcript retaining at most `max_chars` characters.
    pub const fn new(max_chars: usize) -> Self {
        Self {
            segments: VecDeque::new(),
            chars: 0,
            max_chars,
        }
    }

    /// Total characters currently held.
    pub const fn len(&self) -> usize {
        self.chars
    }

    /// Check if the transcript is empty.
    pub const fn is_empty(&self) -> bool {
        self.chars == 0
    }

    /// Styled runs, oldest first.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// The whole transcript as plain text.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// The last (possibly unterminated) line of text.
    pub fn last_line(&self) -> String {
        let mut tail = Vec::new();
        for segment in self.segments.iter().rev() {
            if let Some(pos) = segment.text.rfind('\n') {
                tail.push(&segment.text[pos + 1..]);
                break;
            }
            tail.push(segment.text.as_str());
        }
        tail.into_iter().rev().collect()
    }

    /// Append text in the given style.
    ///
    /// Returns the number of characters trimmed from the front.
    pub fn push(&mut self, text: &str, style: Style) -> usize {
        if text.is_empty() {
            return 0;
        }

        let added = match self.segments.back_mut() {
            Some(last) if last.style == style => {
                let added = text.chars().count();
                last.text.push_str(text);
                last.chars += added;
                added
            }
            _ => {
                let segment = Segment::new(text, style);
                let added = segment.chars;
                self.segments.push_back(segment);
                added
            }
        };
        self.chars += added;

        self.trim()
    }

    /// Cut from the front once the limit is exceeded.
    fn trim(&mut self) -> usize {
        let Some(extra) = self.chars.checked_sub(self.max_chars).filter(|&e| e > 0) else {
            return 0;
        };
        let cut = (extra + self.max_chars / 10).min(self.chars);

        let mut remaining = cut;
        while remaining > 0 {
            let Some(front) = self.segments.front_mut() else {
                break;
            };
            if front.chars <= remaining {
                remaining -= front.chars;
                self.segments.pop_front();
            } else {
                let byte = front
                    .text
                    .char_indices()
                    .nth(remaining)
                    .map_or(front.text.len(), |(i, _)| i);
                front.text.drain(..byte);
                front.chars -= remaining;
                remaining = 0;
            }
        }

        self.chars -= cut;
        tracing::trace!(cut, retained = self.chars, "transcript trimmed");
        cut
    }

    /// Clear all content.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.chars = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transcript_merges_same_style() {
        let mut t = Transcript::new(100);
        t.push("> ", Style::Prompt);
        t.push("1 + 1", Style::Input);
        t.push("\n", Style::Input);
        t.push("=> 2\n", Style::Result);

        let styles: Vec<Style> = t.segments().map(|s| s.style).collect();
        assert_eq!(styles, vec![Style::Prompt, Style::Input, Style::Result]);
        assert_eq!(t.text(), "> 1 + 1\n=> 2\n");
        assert_eq!(t.len(), 13);
    }

    #[test]
    fn test_transcript_last_line() {
        let mut t = Transcript::new(100);
        t.push("out\n", Style::Output);
        t.push("irb", Style::Prompt);
        t.push("> ", Style::Prompt);
        assert_eq!(t.last_line(), "irb> ");

        t.push("x\n", Style::Input);
        assert_eq!(t.last_line(), "");
    }

    #[test]
    fn test_transcript_trims_with_slack() {
        let mut t = Transcript::new(20);
        t.push("0123456789", Style::Output);
        t.push("abcdefghij", Style::Input);
        assert_eq!(t.len(), 20);

        // One over the limit cuts the overflow plus a tenth of the limit.
        let cut = t.push("X", Style::Input);
        assert_eq!(cut, 3);
        assert_eq!(t.len(), 18);
        assert_eq!(t.text(), "3456789abcdefghijX");
    }

    #[test]
    fn test_transcript_trim_drops_whole_segments() {
        let mut t = Transcript::new(10);
        t.push("éé", Style::Banner);
        t.push("123456789", Style::Output);
        assert_eq!(t.text(), "123456789");
        assert_eq!(t.segments().count(), 1);
        assert_eq!(t.len(), 9);
    }

    #[test]
    fn test_transcript_trim_splits_multibyte_segment() {
        let mut t = Transcript::new(10);
        t.push("ééé", Style::Banner);
        t.push("12345678", Style::Output);
        assert_eq!(t.text(), "é12345678");
        assert_eq!(t.len(), 9);
    }

    #[test]
    fn test_transcript_clear() {
        let mut t = Transcript::new(10);
        t.push("abc", Style::Output);
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.text(), "");
    }
}
