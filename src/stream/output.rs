//! Write side: program output decoded as UTF-8 and shown by the UI thread.
//!
//! Output is one-way; it never touches the line source.

use crate::actor::UiCommand;
use crossbeam_channel::Sender;
use std::io;

/// Output stream that forwards decoded text to the UI thread.
///
/// A multi-byte character split across two writes is held back until it is
/// complete; invalid sequences are replaced with U+FFFD.
#[derive(Debug)]
pub struct LineOutput {
    commands: Sender<UiCommand>,
    /// Incomplete UTF-8 tail of the previous write.
    pending: Vec<u8>,
}

impl LineOutput {
    pub(crate) const fn new(commands: Sender<UiCommand>) -> Self {
        Self {
            commands,
            pending: Vec::new(),
        }
    }

    /// Decode everything buffered that forms complete characters.
    ///
    /// Each invalid sequence becomes one U+FFFD; only an incomplete tail at
    /// the very end stays in `pending`.
    fn decode(&mut self) -> String {
        let mut text = String::new();
        let mut start = 0;
        loop {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    text.push_str(valid);
                    start = self.pending.len();
                    break;
                }
                Err(e) => {
                    let valid_end = start + e.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(&self.pending[start..valid_end]));
                    match e.error_len() {
                        Some(invalid) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            start = valid_end + invalid;
                        }
                        None => {
                            start = valid_end;
                            break;
                        }
                    }
                }
            }
        }
        self.pending.drain(..start);
        text
    }

    fn post(&self, text: String) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.commands
            .send(UiCommand::Output(text))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "line editor is gone"))
    }
}

impl io::Write for LineOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        let text = self.decode();
        self.post(text)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        self.post(text)
    }
}

impl Clone for LineOutput {
    fn clone(&self) -> Self {
        Self::new(self.commands.clone())
    }
}
