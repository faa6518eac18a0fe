//! Line discipline buffer.
//!
//! Bytes accumulate until a newline hands the line to a reader. The buffer
//! never grows: a line that would fill the last slot is thrown away and
//! editing starts over from an empty line.

use crate::config;

/// Result of appending a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
    /// The byte was stored.
    Stored,
    /// The buffer was full; the line and the byte were discarded.
    Overflowed,
}

/// Fixed-capacity input line.
///
/// Invariant: `len < N`.
pub struct LineBuffer<const N: usize = { config::tty::LINE_CAPACITY }> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> LineBuffer<N> {
    /// Creates an empty line.
    pub const fn new() -> Self {
        LineBuffer {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slots, including the one that is never filled.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The bytes typed so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Appends one byte.
    pub fn push(&mut self, byte: u8) -> Push {
        if self.len + 1 >= N {
            self.discard();
            return Push::Overflowed;
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        Push::Stored
    }

    /// Erases the last byte. Returns false when the line was already empty.
    pub fn backspace(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.len -= 1;
        self.bytes[self.len] = 0;
        true
    }

    /// Ends the line.
    ///
    /// Returns the first `min(len, requested)` bytes and resets the buffer.
    /// Anything past `requested` is dropped.
    pub fn complete(&mut self, requested: usize) -> &[u8] {
        let count = self.len.min(requested);
        self.len = 0;
        &self.bytes[..count]
    }

    fn discard(&mut self) {
        self.bytes[..self.len].fill(0);
        self.len = 0;
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut line = LineBuffer::<16>::new();
        for &b in b"hello" {
            assert_eq!(line.push(b), Push::Stored);
        }
        assert_eq!(line.complete(usize::MAX), b"hello");
        assert!(line.is_empty());

        line.push(b'x');
        assert_eq!(line.as_bytes(), b"x");
    }

    #[test]
    fn test_overflow_discards_line() {
        let mut line = LineBuffer::<8>::new();
        for b in b'a'..b'a' + 7 {
            assert_eq!(line.push(b), Push::Stored);
        }
        assert_eq!(line.len(), line.capacity() - 1);

        assert_eq!(line.push(b'z'), Push::Overflowed);
        assert!(line.is_empty());
        assert_eq!(line.complete(usize::MAX), b"");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut line = LineBuffer::<8>::new();
        assert!(!line.backspace());
        assert_eq!(line.len(), 0);

        line.push(b'h');
        assert!(line.backspace());
        assert!(!line.backspace());
        assert_eq!(line.complete(usize::MAX), b"");
    }

    #[test]
    fn test_short_request_drops_tail() {
        let mut line = LineBuffer::<16>::new();
        for &b in b"abcdef" {
            line.push(b);
        }
        assert_eq!(line.complete(3), b"abc");

        // the tail is gone, not carried into the next line
        assert!(line.is_empty());
        line.push(b'z');
        assert_eq!(line.complete(16), b"z");
    }

    #[test]
    fn test_default_capacity() {
        let line: LineBuffer = LineBuffer::new();
        assert_eq!(line.capacity(), crate::config::tty::LINE_CAPACITY);
    }
}
