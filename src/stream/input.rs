//! Blocking byte input backed by the line source.

use crate::error::{ReadlineError, Result};
use crate::line::{LineSource, ReadRequest, Reply, Request, Signal};
use crate::rendezvous::Join;
use crate::thread_role::ThreadRole;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Blocking input stream over the lines typed into the editor.
///
/// Each typed line is handed out as UTF-8 bytes, chunked over however many
/// reads the caller performs. Clones share the closed flag.
#[derive(Debug, Clone)]
pub struct LineInput {
    join: Arc<Join<LineSource>>,
    role: Arc<dyn ThreadRole>,
    closed: Arc<AtomicBool>,
}

impl LineInput {
    pub(crate) fn new(join: Arc<Join<LineSource>>, role: Arc<dyn ThreadRole>) -> Self {
        Self {
            join,
            role,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(ReadlineError::Closed)
        } else {
            Ok(())
        }
    }

    /// Bytes that can be read without blocking.
    ///
    /// Only counts the line currently being read; lines typed but not yet
    /// pulled in by a read report `0`.
    pub fn available(&self) -> Result<usize> {
        self.ensure_open()?;
        match self.join.call(Request::Available)? {
            Reply::Available(n) => Ok(n),
            other => Err(ReadlineError::UnexpectedReply(other.channel().name())),
        }
    }

    /// Read up to `len` bytes into `dest[off..off + len]`.
    ///
    /// Blocks until a line is typed or the source shuts down. Returns
    /// `Some(n)` with `n >= 1` bytes read, `Some(0)` when `len` is zero, or
    /// `None` at end of stream.
    pub fn read(&self, dest: &mut [u8], off: usize, len: usize) -> Result<Option<usize>> {
        self.ensure_open()?;
        if self.role.is_ui_thread() {
            return Err(ReadlineError::IllegalUse("read"));
        }

        let end = off
            .checked_add(len)
            .filter(|&end| end <= dest.len())
            .ok_or(ReadlineError::IndexOutOfRange {
                offset: off,
                len,
                capacity: dest.len(),
            })?;
        if len == 0 {
            return Ok(Some(0));
        }

        match self.join.call(Request::Read(ReadRequest::new(off, len)))? {
            Reply::Bytes { offset, bytes } => {
                debug_assert!(offset + bytes.len() <= end);
                dest[offset..offset + bytes.len()].copy_from_slice(&bytes);
                Ok(Some(bytes.len()))
            }
            Reply::EndOfStream => Ok(None),
            other => Err(ReadlineError::UnexpectedReply(other.channel().name())),
        }
    }

    /// Read a single byte; `None` at end of stream.
    pub fn read_byte(&self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        Ok(self.read(&mut byte, 0, 1)?.map(|_| byte[0]))
    }

    /// Close the stream and shut the line source down.
    ///
    /// Idempotent. Readers blocked on other clones see end of stream.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!("input stream closed");
        }
        self.join.send(Signal::Shutdown);
    }

    /// Check if [`LineInput::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl io::Read for LineInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len();
        Ok(Self::read(self, buf, 0, len)?.unwrap_or(0))
    }
}
