//! Byte cursor: a typed line that has not been fully read as bytes yet.

/// UTF-8 bytes of one typed line plus the read offset into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteCursor {
    bytes: Box<[u8]>,
    offset: usize,
}

impl ByteCursor {
    /// Encode `line` as UTF-8 with the offset at the start.
    pub fn from_line(line: &str) -> Self {
        Self {
            bytes: line.as_bytes().into(),
            offset: 0,
        }
    }

    /// Current read offset.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Check if every byte has been consumed.
    pub fn is_drained(&self) -> bool {
        self.offset == self.bytes.len()
    }

    /// Consume up to `max` bytes, advancing the offset.
    pub fn take(&mut self, max: usize) -> &[u8] {
        let start = self.offset;
        let end = start + max.min(self.remaining());
        self.offset = end;
        &self.bytes[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_take_partial() {
        let mut cursor = ByteCursor::from_line("abc");
        assert_eq!(cursor.take(2), b"ab");
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.remaining(), 1);
        assert!(!cursor.is_drained());

        assert_eq!(cursor.take(10), b"c");
        assert!(cursor.is_drained());
        assert_eq!(cursor.take(1), b"");
    }

    #[test]
    fn test_cursor_multibyte() {
        let cursor = ByteCursor::from_line("héllo");
        assert_eq!(cursor.remaining(), 6);
    }
}
