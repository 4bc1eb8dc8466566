//! Byte-level scanning for the plea front-end.
//!
//! This crate provides the lexical layer:
//! - `ByteSet` - constant 256-entry character classes
//! - `ByteReader` - a copyable cursor over an immutable byte buffer
//!
//! No errors originate here. Exhausted input yields empty spans and failed
//! literal probes leave the cursor untouched; callers decide significance.

pub mod classes;
pub use classes::{ByteSet, IDENT, WHITESPACE};

pub mod reader;
pub use reader::ByteReader;
