//! Stream adapters: the blocking byte-stream face shown to script engines.
//!
//! [`LineInput`] reads typed lines through the rendezvous engine;
//! [`LineOutput`] forwards program output to the UI thread.

mod input;
mod output;

pub use input::LineInput;
pub use output::LineOutput;
