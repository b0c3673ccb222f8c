//! Line editor: the UI-thread surface of the console.
//!
//! The [`LineEditor`] turns key presses into typed lines and shows prompts
//! and program output in a [`Transcript`]. History and completion are
//! collaborators behind the [`History`] and [`Completer`] traits.

mod completion;
mod history;
mod input_line;
mod line_editor;
mod transcript;

pub use completion::{Completer, Completion, CompletionMenu, WordCompleter};
pub use history::{History, MemoryHistory};
pub use input_line::InputLine;
pub use line_editor::LineEditor;
pub use transcript::{Segment, Style, Transcript};
