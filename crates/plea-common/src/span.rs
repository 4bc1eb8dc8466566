//! Read-only views into the source buffer.

use std::fmt;

use serde::{Serialize, Serializer};

/// A borrowed slice of source text.
///
/// Spans never own memory; they reference the buffer loaded by the driver.
/// Equality is byte-wise content equality, so two empty spans compare equal
/// even when one of them has no underlying buffer at all.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Span<'a> {
    bytes: &'a [u8],
}

impl<'a> Span<'a> {
    pub fn new(bytes: &'a [u8]) -> Span<'a> {
        Span { bytes }
    }

    /// A span with no underlying reference.
    pub fn empty() -> Span<'static> {
        Span { bytes: &[] }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Display for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.bytes))
    }
}

impl fmt::Debug for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({:?})", String::from_utf8_lossy(self.bytes))
    }
}

impl Serialize for Span<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&String::from_utf8_lossy(self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spans_are_equal_regardless_of_reference() {
        let buf = b"abc";
        let anchored = Span::new(&buf[3..]);
        assert_eq!(anchored, Span::empty());
        assert_eq!(Span::default(), Span::empty());
    }

    #[test]
    fn equality_is_byte_wise() {
        let a = b"foo";
        let b = b"xfoox";
        assert_eq!(Span::new(a), Span::new(&b[1..4]));
        assert_ne!(Span::new(a), Span::new(&b[0..3]));
    }

    #[test]
    fn display_shows_text() {
        assert_eq!(Span::new(b"Nat").to_string(), "Nat");
    }
}
