//! Line accumulation for the serial command line
//!
//! Bytes are collected until `\n`. `\r` is ignored. A line that outgrows
//! the buffer is discarded silently and accumulation restarts empty; the
//! sender is not told.

use heapless::Vec;

use crate::config::LINE_CAPACITY;

/// A complete command line, without terminator
pub type CommandLine = Vec<u8, { LINE_CAPACITY - 1 }>;

/// Result of feeding one byte to the reader
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feed {
    /// Byte consumed, line not complete yet
    Pending,
    /// Line terminator seen
    Line(CommandLine),
    /// Buffer full: in-progress line and this byte were dropped
    Overflow,
}

/// Reader state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReaderState {
    /// Nothing buffered
    Idle,
    /// Part of a line buffered
    Accumulating,
}

/// Bounded line reader
#[derive(Debug, Clone, Default)]
pub struct LineReader {
    buffer: CommandLine,
}

impl LineReader {
    /// Create an empty reader
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
        }
    }

    /// Feed one received byte
    pub fn feed(&mut self, byte: u8) -> Feed {
        match byte {
            b'\r' => Feed::Pending,
            b'\n' => Feed::Line(core::mem::take(&mut self.buffer)),
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    Feed::Overflow
                } else {
                    Feed::Pending
                }
            }
        }
    }

    /// Current state
    pub fn state(&self) -> ReaderState {
        if self.buffer.is_empty() {
            ReaderState::Idle
        } else {
            ReaderState::Accumulating
        }
    }

    /// Number of bytes buffered
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop any buffered bytes
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feed_all(reader: &mut LineReader, bytes: &[u8]) -> std::vec::Vec<Feed> {
        bytes.iter().map(|&b| reader.feed(b)).collect()
    }

    fn last_line(events: &[Feed]) -> Option<&[u8]> {
        events.iter().rev().find_map(|e| match e {
            Feed::Line(line) => Some(line.as_slice()),
            _ => None,
        })
    }

    #[test]
    fn test_simple_line() {
        let mut reader = LineReader::new();
        let events = feed_all(&mut reader, b"INIT\n");

        assert_eq!(last_line(&events), Some(&b"INIT"[..]));
        assert_eq!(reader.state(), ReaderState::Idle);
    }

    #[test]
    fn test_carriage_return_ignored() {
        let mut reader = LineReader::new();
        let events = feed_all(&mut reader, b"LO\rG\r\n");
        assert_eq!(last_line(&events), Some(&b"LOG"[..]));
    }

    #[test]
    fn test_empty_line_is_emitted() {
        let mut reader = LineReader::new();
        assert_eq!(reader.feed(b'\n'), Feed::Line(CommandLine::new()));
    }

    #[test]
    fn test_state_tracks_accumulation() {
        let mut reader = LineReader::new();
        assert_eq!(reader.state(), ReaderState::Idle);
        reader.feed(b'M');
        assert_eq!(reader.state(), ReaderState::Accumulating);
        assert_eq!(reader.len(), 1);
        reader.reset();
        assert!(reader.is_empty());
    }

    #[test]
    fn test_full_line_accepted() {
        let mut reader = LineReader::new();
        let mut input = [b'a'; LINE_CAPACITY];
        input[LINE_CAPACITY - 1] = b'\n';

        let events = feed_all(&mut reader, &input);
        assert_eq!(last_line(&events).map(|l| l.len()), Some(LINE_CAPACITY - 1));
        assert!(!events.contains(&Feed::Overflow));
    }

    #[test]
    fn test_overflow_discards_line_and_byte() {
        let mut reader = LineReader::new();
        for _ in 0..LINE_CAPACITY - 1 {
            assert_eq!(reader.feed(b'a'), Feed::Pending);
        }
        // 57th byte does not fit: everything so far is dropped, including it
        assert_eq!(reader.feed(b'b'), Feed::Overflow);
        assert!(reader.is_empty());

        let events = feed_all(&mut reader, b"LOG\n");
        assert_eq!(last_line(&events), Some(&b"LOG"[..]));
    }

    #[test]
    fn test_overflow_then_newline_yields_empty_line() {
        let mut reader = LineReader::new();
        let mut input = [b'a'; LINE_CAPACITY + 1];
        input[LINE_CAPACITY] = b'\n';

        let events = feed_all(&mut reader, &input);
        assert_eq!(last_line(&events), Some(&b""[..]));
    }

    proptest! {
        #[test]
        fn prop_lines_never_exceed_capacity(bytes in proptest::collection::vec(any::<u8>(), 0..400)) {
            let mut reader = LineReader::new();
            for byte in bytes {
                if let Feed::Line(line) = reader.feed(byte) {
                    prop_assert!(line.len() <= LINE_CAPACITY - 1);
                    prop_assert!(!line.contains(&b'\n'));
                    prop_assert!(!line.contains(&b'\r'));
                }
                prop_assert!(reader.len() < LINE_CAPACITY);
            }
        }

        #[test]
        fn prop_short_lines_pass_through(line in proptest::collection::vec(
            any::<u8>().prop_filter("no terminators", |b| *b != b'\n' && *b != b'\r'),
            0..LINE_CAPACITY - 1,
        )) {
            let mut reader = LineReader::new();
            let mut last = None;
            for &byte in line.iter().chain(core::iter::once(&b'\n')) {
                if let Feed::Line(l) = reader.feed(byte) {
                    last = Some(l);
                }
            }
            let last = last.unwrap();
            prop_assert_eq!(last.as_slice(), line.as_slice());
        }
    }
}
