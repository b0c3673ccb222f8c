//! Tab completion: the completer collaborator and the candidate list.

/// Result of a completion lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// Byte offset in the line where the completed word starts.
    pub start: usize,
    /// Full replacements for `line[start..cursor]`.
    pub candidates: Vec<String>,
}

/// Looks up completion candidates for the text before the cursor.
pub trait Completer: Send {
    /// Complete `line`, whose cursor is at the end.
    fn complete(&self, line: &str) -> Completion;
}

/// Completes the last word against a fixed vocabulary.
#[derive(Debug, Clone, Default)]
pub struct WordCompleter {
    words: Vec<String>,
}

impl WordCompleter {
    /// Create a completer over `words`.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = words.into_iter().map(Into::into).collect();
        words.sort();
        words.dedup();
        Self { words }
    }
}

impl Completer for WordCompleter {
    fn complete(&self, line: &str) -> Completion {
        let start = line
            .rfind(|c: char| c.is_whitespace() || "([{,;".contains(c))
            .map_or(0, |i| i + line[i..].chars().next().map_or(1, char::len_utf8));
        let word = &line[start..];
        let candidates = self
            .words
            .iter()
            .filter(|w| w.starts_with(word))
            .cloned()
            .collect();
        Completion { start, candidates }
    }
}

/// Candidate list shown while several completions match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMenu {
    /// Start of the replaced range in the input line.
    pub start: usize,
    /// End of the replaced range in the input line.
    pub end: usize,
    items: Vec<String>,
    selected: usize,
    visible_rows: usize,
}

impl CompletionMenu {
    /// Build a menu for candidates replacing `start..end` of `line`.
    ///
    /// Text up to the last `.` of the completed word is kept, so candidates
    /// like `obj.method` are listed as `method`.
    pub fn new(line: &str, start: usize, end: usize, candidates: &[String], max_rows: usize) -> Self {
        let cutoff = line
            .get(start..end)
            .and_then(|word| word.rfind('.'))
            .map_or(0, |i| i + 1);
        let items: Vec<String> = candidates
            .iter()
            .map(|c| c.get(cutoff..).unwrap_or(c.as_str()).to_owned())
            .collect();
        let visible_rows = items.len().min(max_rows);

        Self {
            start: start + cutoff,
            end,
            items,
            selected: 0,
            visible_rows,
        }
    }

    /// Listed candidates.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Index of the highlighted candidate.
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// The highlighted candidate.
    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    /// Rows the list should occupy.
    pub const fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Highlight the previous candidate; stops at the first.
    pub const fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Highlight the next candidate; stops at the last.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }
}
