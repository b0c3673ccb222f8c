//! Message types for the line source.
//!
//! These enums define the protocol between the UI thread, the consumer
//! threads and the line source state machine.

use super::cursor::ByteCursor;
use super::request::ReadRequest;
use std::fmt;

/// Named channels of the line source, used in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Sync request: bytes available without blocking.
    Available,
    /// Sync request: read bytes.
    Read,
    /// Sync request: read one whole line.
    GetLine,
    /// State: a partially consumed line.
    Buffer,
    /// State: nothing buffered.
    Empty,
    /// A typed line.
    Line,
    /// Async notification: stop.
    Shutdown,
    /// Terminal state.
    Finished,
}

impl Channel {
    /// Upper-case channel name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Read => "READ",
            Self::GetLine => "GET_LINE",
            Self::Buffer => "BUFFER",
            Self::Empty => "EMPTY",
            Self::Line => "LINE",
            Self::Shutdown => "SHUTDOWN",
            Self::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current state of the line source. Exactly one is held at any time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LineState {
    /// No bytes buffered.
    #[default]
    Empty,
    /// A typed line partially read as bytes.
    Buffer(ByteCursor),
    /// Shut down; never left again.
    Finished,
}

impl LineState {
    /// Channel this state is held on.
    pub const fn channel(&self) -> Channel {
        match self {
            Self::Empty => Channel::Empty,
            Self::Buffer(_) => Channel::Buffer,
            Self::Finished => Channel::Finished,
        }
    }
}

/// Asynchronous messages posted by the UI thread (or by `close`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// A line was typed. The empty string means end of input.
    Line(String),
    /// Stop the line source.
    Shutdown,
}

impl Signal {
    /// Channel this signal is posted on.
    pub const fn channel(&self) -> Channel {
        match self {
            Self::Line(_) => Channel::Line,
            Self::Shutdown => Channel::Shutdown,
        }
    }
}

/// Synchronous requests posted by consumer threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// How many bytes can be read without blocking.
    Available,
    /// Read bytes into the caller's window.
    Read(ReadRequest),
    /// Read one whole line.
    GetLine,
}

impl Request {
    /// Channel this request is posted on.
    pub const fn channel(&self) -> Channel {
        match self {
            Self::Available => Channel::Available,
            Self::Read(_) => Channel::Read,
            Self::GetLine => Channel::GetLine,
        }
    }
}

/// Replies handed back to blocked consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Answer to [`Request::Available`].
    Available(usize),
    /// Answer to [`Request::Read`]: bytes for `dest[offset..]`.
    Bytes {
        /// Destination offset copied from the request.
        offset: usize,
        /// The bytes read; never empty.
        bytes: Vec<u8>,
    },
    /// Answer to [`Request::Read`] once input has ended.
    EndOfStream,
    /// Answer to [`Request::GetLine`]; `None` means no more input.
    Line(Option<String>),
}

impl Reply {
    /// Channel of the request this reply answers.
    pub const fn channel(&self) -> Channel {
        match self {
            Self::Available(_) => Channel::Available,
            Self::Bytes { .. } | Self::EndOfStream => Channel::Read,
            Self::Line(_) => Channel::GetLine,
        }
    }
}
