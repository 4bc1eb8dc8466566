//! Type-expression parsing and identifier interning for the plea front-end.
//!
//! This crate provides:
//! - `TypeNode` - the n-ary type-expression tree
//! - `parse_type` - the stack-driven parser over a [`plea_scanner::ByteReader`]
//! - `NameTrie` / `Symbol` - the hash-routed symbol table
//!
//! Everything produced here is carved from a [`plea_arena::Arena`] and lives
//! exactly as long as it.

pub mod ast;
pub use ast::TypeNode;

pub mod names;
pub use names::{NameTrie, Symbol, SymbolKind, hash_identifier};

pub mod parser;
pub use parser::{ParsedType, parse_type};
