//! Fatal parse outcomes.
//!
//! Every syntax error in this front-end aborts the whole run: there is no
//! recovery path and no partial tree. A [`Diagnostic`] carries the message
//! and the 0-based absolute byte offset of the offending input, and is
//! propagated with `?` up to the driver, which reports it and terminates.

use std::error::Error;
use std::fmt;

/// Outcome type for the whole front-end.
pub type ParseResult<T> = Result<T, Diagnostic>;

/// A fatal error at a byte offset in the source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub offset: usize,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, offset: usize) -> Diagnostic {
        Diagnostic {
            message: message.into(),
            offset,
        }
    }

    /// Shorthand for the common `Expected ...` family of messages.
    pub fn expected(what: impl fmt::Display, offset: usize) -> Diagnostic {
        Diagnostic {
            message: format!("Expected {what}"),
            offset,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.message, self.offset)
    }
}

impl Error for Diagnostic {}
