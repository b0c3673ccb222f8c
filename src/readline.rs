//! Readline: the handle consumer threads use to talk to the console.

use crate::actor::UiCommand;
use crate::error::{ReadlineError, Result};
use crate::line::{LineSource, Reply, Request, Signal};
use crate::rendezvous::Join;
use crate::stream::{LineInput, LineOutput};
use crate::thread_role::ThreadRole;
use crossbeam_channel::Sender;
use std::sync::Arc;

/// Consumer-side handle of a [`LineEditor`](crate::editor::LineEditor).
///
/// Cheap to clone and `Send`; every clone talks to the same line source.
#[derive(Debug, Clone)]
pub struct Readline {
    join: Arc<Join<LineSource>>,
    role: Arc<dyn ThreadRole>,
    commands: Sender<UiCommand>,
    input: LineInput,
}

impl Readline {
    pub(crate) fn new(
        join: Arc<Join<LineSource>>,
        role: Arc<dyn ThreadRole>,
        commands: Sender<UiCommand>,
        input: LineInput,
    ) -> Self {
        Self {
            join,
            role,
            commands,
            input,
        }
    }

    /// Show `prompt` and block until a line is entered.
    ///
    /// Returns the trimmed line, or `None` once input has ended or the
    /// editor has shut down.
    pub fn read_line(&self, prompt: &str) -> Result<Option<String>> {
        if self.role.is_ui_thread() {
            return Err(ReadlineError::IllegalUse("read_line"));
        }

        // Editor already gone: the line source is finished and answers below.
        let _ = self.commands.send(UiCommand::Prompt(prompt.to_owned()));

        match self.join.call(Request::GetLine)? {
            Reply::Line(line) => Ok(line.map(|line| line.trim().to_owned())),
            other => Err(ReadlineError::UnexpectedReply(other.channel().name())),
        }
    }

    /// Blocking byte input. Clones share one closed flag.
    pub fn input(&self) -> LineInput {
        self.input.clone()
    }

    /// Output shown in the editor's transcript.
    pub fn output(&self) -> LineOutput {
        LineOutput::new(self.commands.clone())
    }

    /// Shut the line source down from any thread.
    pub fn shutdown(&self) {
        self.join.send(Signal::Shutdown);
    }

    /// Check if the line source has shut down.
    pub fn is_finished(&self) -> bool {
        self.join.inspect(LineSource::is_finished)
    }
}
