//! Read request: where and how much a byte read wants.

use super::cursor::ByteCursor;

/// Destination window of a byte read: `dest[offset..offset + len]`.
///
/// The destination buffer itself stays with the caller. The reaction that
/// consumes the request returns the bytes and the caller copies them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    /// Start of the window in the caller's buffer.
    pub offset: usize,
    /// Maximum number of bytes wanted.
    pub len: usize,
}

impl ReadRequest {
    /// Create a request for `len` bytes at `offset`.
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Satisfy the request from `cursor`, returning the copied bytes.
    pub fn perform(&self, cursor: &mut ByteCursor) -> Vec<u8> {
        cursor.take(self.len).to_vec()
    }
}
