//! Actor Model: Message-passing between the UI thread and its neighbours.
//!
//! - **Input Actor**: Polls terminal events, forwards them to the UI loop
//! - **UI Loop**: Owns the [`LineEditor`](crate::editor::LineEditor), never blocks
//! - **Consumers**: Script engines blocked in reads, posting prompts and output
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │   UI Loop    │
//!                                      │              │
//! ┌──────────────┐     UiCommand       │              │
//! │  Consumer    │ ─────────────────▶  │              │
//! │  Thread(s)   │                     └──────────────┘
//! └──────────────┘                            │
//!        ▲            Join (rendezvous)       │ LINE / SHUTDOWN
//!        └────────────────────────────────────┘
//! ```

mod input;
mod messages;

pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers, UiCommand};
