//! Line Editor: the UI-thread side of the console.
//!
//! The editor owns the transcript and the line being typed. It never
//! blocks: typed lines and shutdown are posted into the rendezvous engine,
//! prompts and output from consumer threads are drained with
//! [`LineEditor::pump`].

use super::completion::{Completer, CompletionMenu};
use super::history::{History, MemoryHistory};
use super::input_line::InputLine;
use super::transcript::{Style, Transcript};
use crate::actor::{InputEvent, KeyCode, UiCommand};
use crate::config::ReadlineConfig;
use crate::line::{LineSource, Signal};
use crate::readline::Readline;
use crate::rendezvous::Join;
use crate::stream::LineInput;
use crate::thread_role::ThreadRole;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// UI-thread controller of an interactive console.
pub struct LineEditor {
    config: ReadlineConfig,
    join: Arc<Join<LineSource>>,
    /// Handle given to consumers; shares the input stream's closed flag.
    readline: Readline,
    commands_rx: Receiver<UiCommand>,
    transcript: Transcript,
    input: InputLine,
    history: Box<dyn History>,
    completer: Option<Box<dyn Completer>>,
    /// In-progress line saved while browsing history.
    saved_line: String,
    menu: Option<CompletionMenu>,
    disposed: bool,
    /// Needs redraw flag.
    dirty: bool,
}

impl LineEditor {
    /// Create an editor whose line source starts out empty.
    ///
    /// `role` identifies the UI thread; blocking calls made on it are
    /// rejected.
    pub fn new(config: ReadlineConfig, role: impl ThreadRole + 'static) -> Self {
        let join = Arc::new(Join::new(LineSource::new()));
        let role: Arc<dyn ThreadRole> = Arc::new(role);
        let (commands_tx, commands_rx): (Sender<UiCommand>, _) = unbounded();
        let input = LineInput::new(join.clone(), role.clone());
        let readline = Readline::new(join.clone(), role, commands_tx, input);

        let mut transcript = Transcript::new(config.max_transcript_chars);
        if let Some(banner) = &config.banner {
            transcript.push(banner, Style::Banner);
            if !banner.ends_with('\n') {
                transcript.push("\n", Style::Banner);
            }
        }

        Self {
            config,
            join,
            readline,
            commands_rx,
            transcript,
            input: InputLine::new(),
            history: Box::new(MemoryHistory::default()),
            completer: None,
            saved_line: String::new(),
            menu: None,
            disposed: false,
            dirty: true,
        }
    }

    /// Handle for consumer threads.
    pub fn readline(&self) -> Readline {
        self.readline.clone()
    }

    /// Replace the history collaborator.
    pub fn set_history(&mut self, history: Box<dyn History>) {
        self.history = history;
    }

    /// Install a completer; Tab does nothing without one.
    pub fn set_completer(&mut self, completer: Box<dyn Completer>) {
        self.completer = Some(completer);
    }

    /// The transcript shown above the input line.
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The line being typed.
    pub const fn input(&self) -> &InputLine {
        &self.input
    }

    /// The history collaborator.
    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    /// Candidate list, while one is shown.
    pub const fn completion_menu(&self) -> Option<&CompletionMenu> {
        self.menu.as_ref()
    }

    /// Check if [`LineEditor::dispose`] has run.
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Check if this editor needs to be redrawn.
    pub const fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Clear the redraw flag after rendering.
    pub const fn clear_redraw(&mut self) {
        self.dirty = false;
    }

    /// The last `height` screen lines: transcript followed by the input.
    pub fn visible_lines(&self, height: usize) -> Vec<String> {
        let mut text = self.transcript.text();
        text.push_str(self.input.content());
        let lines: Vec<&str> = text.split('\n').collect();
        let start = lines.len().saturating_sub(height);
        lines[start..].iter().map(|l| (*l).to_owned()).collect()
    }

    /// Display column of the caret on the last screen line.
    pub fn caret_column(&self) -> usize {
        self.transcript.last_line().width() + self.input.cursor_column()
    }

    /// Apply prompts and output posted by consumer threads.
    ///
    /// Returns the number of commands applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.commands_rx.try_recv() {
            match command {
                UiCommand::Prompt(prompt) => {
                    self.transcript.push(prompt.trim(), Style::Prompt);
                    self.transcript.push(" ", Style::Prompt);
                    self.history.move_to_end();
                    self.saved_line.clear();
                }
                UiCommand::Output(text) => {
                    let style = if text.starts_with(&self.config.result_prefix) {
                        Style::Result
                    } else {
                        Style::Output
                    };
                    self.transcript.push(&text, style);
                }
            }
            applied += 1;
        }
        if applied > 0 {
            self.dirty = true;
        }
        applied
    }

    /// Submit a line as if typed and confirmed with Enter.
    ///
    /// The line is echoed to the transcript, recorded in history, and
    /// delivered to consumers with a trailing newline.
    pub fn submit_line(&mut self, text: &str) {
        self.transcript.push(text, Style::Input);
        self.transcript.push("\n", Style::Input);

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.history.add(trimmed);
        }
        self.history.move_to_end();
        self.dirty = true;

        tracing::trace!(bytes = text.len() + 1, "line submitted");
        self.join.send(Signal::Line(format!("{text}\n")));
    }

    /// Signal end of input (Ctrl-D).
    pub fn end_of_input(&self) {
        tracing::debug!("end of input");
        self.join.send(Signal::Line(String::new()));
    }

    /// Shut the line source down; blocked consumers return `None`.
    ///
    /// Idempotent. Also runs on drop.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            tracing::debug!("line editor disposed");
        }
        self.join.send(Signal::Shutdown);
    }

    /// Handle an input event.
    ///
    /// Returns `true` if the event was consumed by the editor.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let consumed = match event {
            InputEvent::Key { code, modifiers } => {
                let consumed = match code {
                    KeyCode::Tab => self.complete(),
                    KeyCode::Enter => {
                        self.enter();
                        true
                    }
                    KeyCode::Up => {
                        self.up();
                        true
                    }
                    KeyCode::Down => {
                        self.down();
                        true
                    }
                    KeyCode::Left => {
                        self.input.left();
                        true
                    }
                    KeyCode::Right => {
                        self.input.right();
                        true
                    }
                    KeyCode::Backspace => {
                        self.input.backspace();
                        true
                    }
                    KeyCode::Delete => {
                        self.input.delete();
                        true
                    }
                    KeyCode::Home => {
                        self.input.home();
                        true
                    }
                    KeyCode::End => {
                        self.input.end();
                        true
                    }
                    KeyCode::Esc => self.menu.is_some(),
                    KeyCode::Char(c) if modifiers.control => match c {
                        'a' => {
                            self.input.home();
                            true
                        }
                        'e' => {
                            self.input.end();
                            true
                        }
                        'd' => {
                            self.end_of_input();
                            true
                        }
                        _ => false,
                    },
                    KeyCode::Char(_) if modifiers.alt => false,
                    KeyCode::Char(c) => {
                        self.input.insert_char(*c);
                        true
                    }
                };

                if !matches!(code, KeyCode::Tab | KeyCode::Up | KeyCode::Down) {
                    self.menu = None;
                }
                consumed
            }
            InputEvent::Paste(text) => {
                self.paste(text);
                true
            }
            InputEvent::Resize { .. } => true,
            InputEvent::Error(_) | InputEvent::Shutdown => false,
        };

        if consumed {
            self.dirty = true;
        }
        consumed
    }

    fn enter(&mut self) {
        if let Some(menu) = self.menu.take() {
            if let Some(item) = menu.selected_item() {
                self.input.replace_range(menu.start, menu.end, item);
            }
            return;
        }

        let line = self.input.take();
        self.submit_line(&line);
    }

    fn paste(&mut self, text: &str) {
        let mut parts = text.split('\n').peekable();
        while let Some(part) = parts.next() {
            self.input.insert_str(part.trim_end_matches('\r'));
            if parts.peek().is_some() {
                let line = self.input.take();
                self.submit_line(&line);
            }
        }
    }

    fn up(&mut self) {
        if let Some(menu) = &mut self.menu {
            menu.select_previous();
            return;
        }

        if self.history.next() {
            self.history.previous();
        } else {
            // At the end: keep what was being typed.
            self.saved_line = self.input.content().to_owned();
        }

        if !self.history.previous() {
            return;
        }
        let old = self.history.current().unwrap_or_default().trim().to_owned();
        self.input.set(&old);
    }

    fn down(&mut self) {
        if let Some(menu) = &mut self.menu {
            menu.select_next();
            return;
        }

        if !self.history.next() {
            return;
        }
        let old = if self.history.next() {
            self.history.previous();
            self.history.current().unwrap_or_default().trim().to_owned()
        } else {
            self.saved_line.clone()
        };
        self.input.set(&old);
    }

    fn complete(&mut self) -> bool {
        let Some(completer) = &self.completer else {
            return false;
        };
        if self.menu.is_some() {
            return true;
        }

        let cursor = self.input.cursor();
        let line = &self.input.content()[..cursor];
        let completion = completer.complete(line);
        if completion.start > cursor || !line.is_char_boundary(completion.start) {
            tracing::warn!(start = completion.start, cursor, "completer returned a bad position");
            return true;
        }

        match completion.candidates.as_slice() {
            [] => {}
            [only] => {
                self.input.replace_range(completion.start, cursor, only);
            }
            candidates => {
                self.menu = Some(CompletionMenu::new(
                    line,
                    completion.start,
                    cursor,
                    candidates,
                    self.config.max_completion_rows,
                ));
            }
        }
        true
    }
}

impl std::fmt::Debug for LineEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor")
            .field("join", &self.join)
            .field("input", &self.input)
            .field("transcript_chars", &self.transcript.len())
            .field("history", &self.history.len())
            .field("menu", &self.menu)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl Drop for LineEditor {
    fn drop(&mut self) {
        self.dispose();
    }
}
