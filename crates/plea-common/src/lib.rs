//! Common types and utilities for the plea front-end.
//!
//! This crate provides the foundational types used across all plea crates:
//! - Source views (`Span`)
//! - Fatal parse outcomes (`Diagnostic`, `ParseResult`)
//! - Centralized limits and thresholds

pub mod diagnostics;
pub use diagnostics::{Diagnostic, ParseResult};

pub mod span;
pub use span::Span;

pub mod limits;
