//! Line source: the state machine behind the blocking input stream.
//!
//! Typed lines queue up next to the current [`LineState`]; requests are
//! answered by a single `match` over `(request, state)`.
//!
//! ```text
//!              LINE "x…" + READ                READ drains cursor
//!   ┌───────┐ ─────────────────▶ ┌────────┐ ─────────────────────▶ ┌───────┐
//!   │ EMPTY │                    │ BUFFER │                        │ EMPTY │
//!   └───────┘ ◀───────────────── └────────┘                        └───────┘
//!       │                            │
//!       │ SHUTDOWN                   │ SHUTDOWN
//!       ▼                            ▼
//!   ┌──────────┐  (LINE, SHUTDOWN are absorbed; state never changes again)
//!   │ FINISHED │
//!   └──────────┘
//! ```

use super::channel::{LineState, Reply, Request, Signal};
use super::cursor::ByteCursor;
use super::request::ReadRequest;
use crate::rendezvous::Reactor;
use std::collections::VecDeque;
use std::mem;

/// State of one line source: the current state plus typed lines not yet
/// consumed.
#[derive(Debug, Default)]
pub struct LineSource {
    state: LineState,
    lines: VecDeque<String>,
}

impl LineSource {
    /// Create a line source in the `EMPTY` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub const fn state(&self) -> &LineState {
        &self.state
    }

    /// Number of typed lines waiting to be consumed.
    pub fn pending_lines(&self) -> usize {
        self.lines.len()
    }

    /// Check if the source has shut down.
    pub const fn is_finished(&self) -> bool {
        matches!(self.state, LineState::Finished)
    }

    /// Read from the buffered cursor; the state becomes `EMPTY` once drained.
    fn read_buffer(&mut self, request: &ReadRequest) -> Reply {
        let LineState::Buffer(mut cursor) = mem::take(&mut self.state) else {
            return Reply::EndOfStream;
        };
        let bytes = request.perform(&mut cursor);
        if !cursor.is_drained() {
            self.state = LineState::Buffer(cursor);
        }
        Reply::Bytes {
            offset: request.offset,
            bytes,
        }
    }
}

impl Reactor for LineSource {
    type Signal = Signal;
    type Request = Request;
    type Reply = Reply;

    fn signal(&mut self, signal: Signal) {
        match signal {
            Signal::Line(line) => {
                if self.is_finished() {
                    tracing::debug!(bytes = line.len(), "dropping line typed after shutdown");
                } else {
                    self.lines.push_back(line);
                }
            }
            Signal::Shutdown => {
                let previous = mem::replace(&mut self.state, LineState::Finished);
                if previous != LineState::Finished {
                    tracing::debug!(
                        from = %previous.channel(),
                        dropped_lines = self.lines.len(),
                        "line source finished"
                    );
                }
                self.lines.clear();
            }
        }
    }

    fn react(&mut self, request: &Request) -> Option<Reply> {
        let reply = match (request, &self.state) {
            (Request::Available, LineState::Buffer(cursor)) => Reply::Available(cursor.remaining()),
            (Request::Available, LineState::Empty | LineState::Finished) => Reply::Available(0),

            (Request::Read(read), LineState::Buffer(_)) => self.read_buffer(read),
            (Request::Read(read), LineState::Empty) => {
                let line = self.lines.pop_front()?;
                if line.is_empty() {
                    Reply::EndOfStream
                } else {
                    self.state = LineState::Buffer(ByteCursor::from_line(&line));
                    self.read_buffer(read)
                }
            }
            (Request::Read(_), LineState::Finished) => Reply::EndOfStream,

            (Request::GetLine, LineState::Finished) => Reply::Line(None),
            (Request::GetLine, _) => {
                let line = self.lines.pop_front()?;
                Reply::Line(Some(line).filter(|line| !line.is_empty()))
            }
        };

        tracing::trace!(
            request = %request.channel(),
            state = %self.state.channel(),
            "reaction fired"
        );
        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendezvous::Join;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn read(join: &Join<LineSource>, len: usize) -> Reply {
        join.call(Request::Read(ReadRequest::new(0, len))).unwrap()
    }

    fn bytes(reply: Reply) -> Vec<u8> {
        match reply {
            Reply::Bytes { bytes, .. } => bytes,
            other => panic!("expected bytes, got {other:?}"),
        }
    }

    fn wait_for_waiters(join: &Join<LineSource>, n: usize) {
        for _ in 0..500 {
            if join.waiting() == n {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("expected {n} waiters, found {}", join.waiting());
    }

    #[test]
    fn test_starts_empty() {
        let join = Join::new(LineSource::new());
        assert_eq!(join.inspect(|s| s.state().clone()), LineState::Empty);
        assert_eq!(join.call(Request::Available), Ok(Reply::Available(0)));
    }

    #[test]
    fn test_read_one_byte_at_a_time() {
        let join = Join::new(LineSource::new());
        join.send(Signal::Line("ab".to_string()));

        assert_eq!(bytes(read(&join, 1)), b"a");
        let state = join.inspect(|s| s.state().clone());
        assert!(matches!(state, LineState::Buffer(ref c) if c.offset() == 1));
        assert_eq!(join.call(Request::Available), Ok(Reply::Available(1)));

        assert_eq!(bytes(read(&join, 1)), b"b");
        assert_eq!(join.inspect(|s| s.state().clone()), LineState::Empty);
        assert_eq!(join.call(Request::Available), Ok(Reply::Available(0)));
    }

    #[test]
    fn test_read_keeps_destination_offset() {
        let join = Join::new(LineSource::new());
        join.send(Signal::Line("xyz".to_string()));
        let reply = join.call(Request::Read(ReadRequest::new(5, 8))).unwrap();
        assert_eq!(
            reply,
            Reply::Bytes {
                offset: 5,
                bytes: b"xyz".to_vec()
            }
        );
    }

    #[test]
    fn test_available_does_not_consume_line() {
        let join = Join::new(LineSource::new());
        join.send(Signal::Line("hello".to_string()));
        // A typed line only becomes bytes once a read pulls it in.
        assert_eq!(join.call(Request::Available), Ok(Reply::Available(0)));
        assert_eq!(bytes(read(&join, 2)), b"he");
        assert_eq!(join.call(Request::Available), Ok(Reply::Available(3)));
    }

    #[test]
    fn test_empty_line_is_end_of_stream() {
        let join = Join::new(LineSource::new());
        join.send(Signal::Line(String::new()));
        assert_eq!(read(&join, 4), Reply::EndOfStream);
        assert_eq!(join.inspect(|s| s.state().clone()), LineState::Empty);

        join.send(Signal::Line("next".to_string()));
        assert_eq!(bytes(read(&join, 4)), b"next");
    }

    #[test]
    fn test_lines_are_delivered_in_order() {
        let join = Join::new(LineSource::new());
        join.send(Signal::Line("one".to_string()));
        join.send(Signal::Line("two".to_string()));

        assert_eq!(bytes(read(&join, 10)), b"one");
        assert_eq!(
            join.call(Request::GetLine),
            Ok(Reply::Line(Some("two".to_string())))
        );
        assert_eq!(join.inspect(LineSource::pending_lines), 0);
    }

    #[test]
    fn test_buffer_is_drained_before_next_line() {
        let join = Join::new(LineSource::new());
        join.send(Signal::Line("abc".to_string()));
        assert_eq!(bytes(read(&join, 1)), b"a");
        join.send(Signal::Line("def".to_string()));
        assert_eq!(bytes(read(&join, 10)), b"bc");
        assert_eq!(bytes(read(&join, 10)), b"def");
    }

    #[test]
    fn test_shutdown_is_terminal() {
        let join = Join::new(LineSource::new());
        join.send(Signal::Line("abc".to_string()));
        assert_eq!(bytes(read(&join, 1)), b"a");

        join.send(Signal::Shutdown);
        join.send(Signal::Shutdown);
        join.send(Signal::Line("late".to_string()));

        for _ in 0..3 {
            assert_eq!(read(&join, 4), Reply::EndOfStream);
            assert_eq!(join.call(Request::GetLine), Ok(Reply::Line(None)));
            assert_eq!(join.call(Request::Available), Ok(Reply::Available(0)));
        }
        assert_eq!(join.inspect(|s| s.state().clone()), LineState::Finished);
        assert_eq!(join.inspect(LineSource::pending_lines), 0);
    }

    #[test]
    fn test_shutdown_drops_queued_lines() {
        let join = Join::new(LineSource::new());
        join.send(Signal::Line("queued".to_string()));
        join.send(Signal::Shutdown);
        assert_eq!(join.call(Request::GetLine), Ok(Reply::Line(None)));
    }

    #[test]
    fn test_blocked_read_released_by_line() {
        let join = Arc::new(Join::new(LineSource::new()));
        let reader = {
            let join = join.clone();
            thread::spawn(move || read(&join, 4))
        };

        wait_for_waiters(&join, 1);
        join.send(Signal::Line("hi".to_string()));

        assert_eq!(bytes(reader.join().unwrap()), b"hi");
        assert_eq!(join.inspect(|s| s.state().clone()), LineState::Empty);
    }

    #[test]
    fn test_pending_get_line_released_by_shutdown() {
        let join = Arc::new(Join::new(LineSource::new()));
        let readers: Vec<_> = (0..3)
            .map(|_| {
                let join = join.clone();
                thread::spawn(move || join.call(Request::GetLine))
            })
            .collect();

        wait_for_waiters(&join, 3);
        join.send(Signal::Shutdown);

        for reader in readers {
            assert_eq!(reader.join().unwrap(), Ok(Reply::Line(None)));
        }
    }

    #[test]
    fn test_get_line_end_of_input_is_none() {
        let join = Join::new(LineSource::new());
        join.send(Signal::Line(String::new()));
        assert_eq!(join.call(Request::GetLine), Ok(Reply::Line(None)));
        // Not terminal: later lines still arrive.
        join.send(Signal::Line("x\n".to_string()));
        assert_eq!(
            join.call(Request::GetLine),
            Ok(Reply::Line(Some("x\n".to_string())))
        );
    }

    proptest! {
        #[test]
        fn chunked_reads_concatenate_to_line(line in "\\PC{1,40}", chunk in 1usize..8) {
            let join = Join::new(LineSource::new());
            join.send(Signal::Line(line.clone()));

            let mut out = Vec::new();
            while out.len() < line.len() {
                out.extend(bytes(read(&join, chunk)));
            }

            prop_assert_eq!(out, line.into_bytes());
            prop_assert_eq!(join.inspect(|s| s.state().clone()), LineState::Empty);
        }
    }
}
