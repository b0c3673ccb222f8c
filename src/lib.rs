//! # Flywheel Readline
//!
//! A blocking line stream bridged onto a single-threaded, event-driven line
//! editor.
//!
//! Script engines expect a terminal: they block in "read a line" or "read
//! bytes" and write their output to a stream. A UI surface, on the other
//! hand, runs one cooperative thread that must never block. This crate sits
//! between the two.
//!
//! ## Core Concepts
//!
//! - **Rendezvous engine**: blocking calls meet asynchronous signals under one mutex
//! - **Line source**: `EMPTY` / `BUFFER` / `FINISHED` state machine over typed lines
//! - **Stream adapters**: `std::io::Read` / `std::io::Write` faces for consumers
//! - **Line editor**: the UI-thread side; Enter posts a line, disposal posts shutdown
//!
//! Shutdown is terminal and never missed: every blocked and future reader
//! gets end of stream.
//!
//! ## Example
//!
//! ```rust,ignore
//! use flywheel_readline::{LineEditor, ReadlineConfig, UiThread};
//!
//! // On the UI thread
//! let mut editor = LineEditor::new(ReadlineConfig::default(), UiThread::current());
//! let readline = editor.readline();
//!
//! std::thread::spawn(move || {
//!     while let Ok(Some(line)) = readline.read_line("> ") {
//!         println!("got {line}");
//!     }
//! });
//!
//! // UI loop: feed key presses, drain prompts and output
//! editor.handle_input(&event);
//! editor.pump();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod editor;
pub mod error;
pub mod line;
pub mod logging;
pub mod readline;
pub mod rendezvous;
pub mod stream;
pub mod thread_role;

// Re-exports for convenience
pub use actor::{InputActor, InputEvent, KeyCode, KeyModifiers, UiCommand};
pub use config::ReadlineConfig;
pub use editor::{Completer, History, LineEditor, MemoryHistory, Style, Transcript, WordCompleter};
pub use error::{ReadlineError, Result};
pub use line::{ByteCursor, Channel, LineSource, LineState, ReadRequest};
pub use readline::Readline;
pub use rendezvous::{Join, Reactor};
pub use stream::{LineInput, LineOutput};
pub use thread_role::{Headless, ThreadRole, UiThread};
