use crate::tokenizer::char_utils::{
    is_alpha, is_blank, is_blank_or_break, is_blank_or_breakz, is_break, is_breakz, is_flow,
};
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use core::char::{decode_utf16, DecodeUtf16, REPLACEMENT_CHARACTER};
use core::str::Chars;
use yamlet_common::{ScanResult, YamlError, YamlResult};

///
/// Character input of the [`Scanner`](crate::Scanner).
///
/// # Peeking
/// - `peek_nth(n)` returns the character `n` positions past the cursor, or `'\0'` past the end
///   of input. Nothing is consumed.
/// - `peek()`, `peek_two()` and the `next_is_*` helpers are shorthands on top of `peek_nth`.
///
/// # Skipping
/// - `skip(n)` advances the cursor. Only characters made visible by an earlier peek may be
///   skipped, anything else is an out of range error.
/// - `end_of_input()` is true once the cursor reached the end of the underlying stream.
pub trait Source {
    #[must_use]
    fn peek_nth(&mut self, n: usize) -> char;

    fn skip(&mut self, n: usize) -> ScanResult;

    #[must_use]
    fn end_of_input(&mut self) -> bool;

    #[must_use]
    fn peek(&mut self) -> char {
        self.peek_nth(0)
    }

    #[must_use]
    fn peek_two(&mut self) -> [char; 2] {
        [self.peek_nth(0), self.peek_nth(1)]
    }

    fn next_is(&mut self, chr: char) -> bool {
        self.peek() == chr
    }

    fn next_is_three(&mut self, chr: char) -> bool {
        self.peek_nth(0) == chr && self.peek_nth(1) == chr && self.peek_nth(2) == chr
    }

    /// `---` or `...` followed by a blank, a break or the end of input.
    fn next_is_document_indicator(&mut self) -> bool {
        (self.next_is_three('-') || self.next_is_three('.')) && is_blank_or_breakz(self.peek_nth(3))
    }

    fn next_is_flow(&mut self) -> bool {
        is_flow(self.peek())
    }

    fn next_is_break(&mut self) -> bool {
        is_break(self.peek())
    }

    fn next_is_blank(&mut self) -> bool {
        is_blank(self.peek())
    }

    fn next_is_breakz(&mut self) -> bool {
        is_breakz(self.peek())
    }

    fn next_is_blank_or_break(&mut self) -> bool {
        is_blank_or_break(self.peek())
    }

    fn next_is_blank_or_breakz(&mut self) -> bool {
        is_blank_or_breakz(self.peek())
    }

    fn next_is_alpha(&mut self) -> bool {
        is_alpha(self.peek())
    }
}

/// Capacity used by [`LookAheadBuffer::new_str`] and friends.
pub const DEFAULT_CAPACITY: usize = 1024;
/// Smallest window the scanner can work with (`---` plus one character).
pub const MIN_CAPACITY: usize = 4;

/// Fixed size ring buffer over a character iterator.
///
/// Characters are pulled from the iterator only when an offset past the buffered ones is
/// peeked, so every character of the input is read exactly once.
pub struct LookAheadBuffer<I> {
    input: I,
    buffer: Vec<char>,
    mask: usize,
    first: usize,
    count: usize,
    input_exhausted: bool,
}

impl<'a> LookAheadBuffer<Chars<'a>> {
    pub fn new_str(input: &'a str) -> Self {
        LookAheadBuffer::with_capacity_unchecked(input.chars(), DEFAULT_CAPACITY)
    }
}

impl<'a> From<&'a str> for LookAheadBuffer<Chars<'a>> {
    fn from(value: &'a str) -> Self {
        LookAheadBuffer::new_str(value)
    }
}

/// Decodes UTF-16 units, combining surrogate pairs. Lone surrogates become `U+FFFD`.
pub struct Utf16Chars<I: Iterator<Item = u16>> {
    inner: DecodeUtf16<I>,
}

impl<I: Iterator<Item = u16>> Iterator for Utf16Chars<I> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|res| res.unwrap_or(REPLACEMENT_CHARACTER))
    }
}

impl<I: Iterator<Item = u16>> LookAheadBuffer<Utf16Chars<I>> {
    pub fn new_utf16<T: IntoIterator<IntoIter = I>>(units: T) -> Self {
        let chars = Utf16Chars {
            inner: decode_utf16(units.into_iter()),
        };
        LookAheadBuffer::with_capacity_unchecked(chars, DEFAULT_CAPACITY)
    }
}

impl<I: Iterator<Item = char>> LookAheadBuffer<I> {
    /// Creates a buffer holding at most `capacity` characters of lookahead.
    ///
    /// # Errors
    /// `capacity` must be a power of two no smaller than [`MIN_CAPACITY`].
    pub fn new(input: I, capacity: usize) -> YamlResult<Self> {
        if capacity < MIN_CAPACITY || !capacity.is_power_of_two() {
            return Err(YamlError::InvalidArgument(format!(
                "look-ahead capacity must be a power of two of at least {MIN_CAPACITY}, got {capacity}"
            )));
        }
        Ok(Self::with_capacity_unchecked(input, capacity))
    }

    fn with_capacity_unchecked(input: I, capacity: usize) -> Self {
        LookAheadBuffer {
            input,
            buffer: vec!['\0'; capacity],
            mask: capacity - 1,
            first: 0,
            count: 0,
            input_exhausted: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of characters peeked but not yet skipped.
    pub fn buffered(&self) -> usize {
        self.count
    }

    fn fill(&mut self, upto: usize) {
        while self.count <= upto && !self.input_exhausted {
            match self.input.next() {
                Some(chr) => {
                    let idx = (self.first + self.count) & self.mask;
                    self.buffer[idx] = chr;
                    self.count += 1;
                }
                None => self.input_exhausted = true,
            }
        }
    }

    /// Same as [`Source::peek_nth`] but rejects offsets outside the window.
    pub fn try_peek(&mut self, offset: usize) -> YamlResult<char> {
        if offset >= self.capacity() {
            return Err(YamlError::OutOfRange(format!(
                "cannot peek {offset} characters ahead, the buffer holds {}",
                self.capacity()
            )));
        }
        Ok(self.peek_nth(offset))
    }
}

impl<I: Iterator<Item = char>> Source for LookAheadBuffer<I> {
    /// Offsets outside the window read as `'\0'`, use [`LookAheadBuffer::try_peek`] to have
    /// them rejected instead.
    fn peek_nth(&mut self, n: usize) -> char {
        if n >= self.capacity() {
            return '\0';
        }
        if n >= self.count {
            self.fill(n);
            if n >= self.count {
                return '\0';
            }
        }
        self.buffer[(self.first + n) & self.mask]
    }

    fn skip(&mut self, n: usize) -> ScanResult {
        if n > self.count {
            return Err(YamlError::OutOfRange(format!(
                "cannot skip {n} characters, only {} were peeked",
                self.count
            )));
        }
        self.first = (self.first + n) & self.mask;
        self.count -= n;
        Ok(())
    }

    fn end_of_input(&mut self) -> bool {
        if self.count == 0 {
            self.fill(0);
        }
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_skip() {
        let mut buf = LookAheadBuffer::new_str("abc");
        assert_eq!(buf.peek(), 'a');
        assert_eq!(buf.peek_nth(2), 'c');
        assert_eq!(buf.peek_nth(3), '\0');
        assert!(buf.skip(2).is_ok());
        assert_eq!(buf.peek(), 'c');
        assert!(!buf.end_of_input());
        assert!(buf.skip(1).is_ok());
        assert!(buf.end_of_input());
        assert_eq!(buf.peek(), '\0');
    }

    #[test]
    fn test_skip_unpeeked() {
        let mut buf = LookAheadBuffer::new_str("abcdef");
        assert_eq!(buf.peek(), 'a');
        let err = buf.skip(3);
        assert!(matches!(err, Err(YamlError::OutOfRange(_))));
        assert_eq!(buf.peek(), 'a');
    }

    #[test]
    fn test_wraps_around() {
        let input = "0123456789";
        let mut buf = LookAheadBuffer::new(input.chars(), 4).unwrap();
        let mut seen = alloc::string::String::new();
        while !buf.end_of_input() {
            let _ = buf.peek_nth(3);
            seen.push(buf.peek());
            buf.skip(1).unwrap();
        }
        assert_eq!(seen, input);
    }

    #[test]
    fn test_capacity() {
        assert!(LookAheadBuffer::new("".chars(), 6).is_err());
        assert!(LookAheadBuffer::new("".chars(), 2).is_err());
        let mut buf = LookAheadBuffer::new("abcdefgh".chars(), 4).unwrap();
        assert!(buf.try_peek(3).is_ok());
        assert!(buf.try_peek(4).is_err());
        assert_eq!(buf.peek_nth(4), '\0');
    }

    #[test]
    fn test_utf16_pairs() {
        let units: Vec<u16> = "a😀b".encode_utf16().collect();
        let mut buf = LookAheadBuffer::new_utf16(units);
        assert_eq!(buf.peek_nth(1), '😀');
        assert_eq!(buf.peek_nth(2), 'b');
    }

    #[test]
    fn test_lone_surrogate() {
        let mut buf = LookAheadBuffer::new_utf16([0xD83Du16, 0x0061]);
        assert_eq!(buf.peek(), REPLACEMENT_CHARACTER);
        assert_eq!(buf.peek_nth(1), 'a');
    }
}
