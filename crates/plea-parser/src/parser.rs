//! Stack-driven parser for nested type expressions.

use tracing::trace;

use plea_arena::{Arena, ArenaVec};
use plea_common::limits::PARSER_STACK_PREALLOC;
use plea_common::{Diagnostic, ParseResult, Span};
use plea_scanner::ByteReader;

use crate::ast::TypeNode;
use crate::names::NameTrie;

/// A successfully parsed type expression.
pub struct ParsedType<'a> {
    pub root: &'a TypeNode<'a>,
    /// Bytes the reader travelled, including interior whitespace.
    pub consumed: usize,
}

/// Parse one type expression.
///
/// Grammar: `type := name ('(' type (',' type)* ')')?` where
/// `name := identifier | 'let' identifier identifier` (binder form:
/// binding name, then the ranged-over type's name).
///
/// The parser maintains an explicit stack of open groups seeded with one
/// implicit root. A group opens only when `(` follows a name immediately,
/// with no whitespace between. Tokens that cannot extend the expression
/// (an arrow, a keyword) end it and are left for the caller.
///
/// Returns `None` when the input yields no type at all; otherwise the
/// implicit root's single accumulated child, or - for a top-level comma
/// list - the implicit root itself as an unnamed group. When `names` is
/// supplied, binder keys are interned with their kind left unset.
///
/// Every syntax error is fatal to the whole parse and carries the byte
/// offset of the offending token. Callers that need to rescan must
/// snapshot the reader themselves; only failed literal probes roll back.
pub fn parse_type<'a>(
    arena: &'a Arena,
    names: Option<&NameTrie<'a>>,
    reader: &mut ByteReader<'a>,
) -> ParseResult<Option<ParsedType<'a>>> {
    let start = reader.pos();
    trace!(offset = start, "parse_type");

    let mut stack: ArenaVec<'a, &'a mut TypeNode<'a>> =
        ArenaVec::with_capacity(arena, PARSER_STACK_PREALLOC);
    stack.push(arena.alloc(TypeNode::new(arena, Span::empty(), Span::empty())));
    let mut expecting_name = true;

    while !reader.is_eof() {
        reader.scan_whitespace();
        let at = reader.pos();

        if expecting_name {
            let ident = reader.scan_identifier();
            if !ident.is_empty() {
                let (name, key) = if ident.as_bytes() == b"let" {
                    read_binder(reader, names, arena)?
                } else {
                    (ident, Span::empty())
                };

                let node = arena.alloc(TypeNode::new(arena, name, key));
                if reader.match_literal(b"(") {
                    stack.push(node);
                    expecting_name = true;
                } else {
                    let top = stack.last_mut().expect("the implicit root is always open");
                    top.children.push(node);
                    expecting_name = false;
                }
                continue;
            }
            if reader.match_literal(b"(") {
                return Err(Diagnostic::expected("type before `(`", at));
            }
        }

        if reader.match_literal(b")") {
            if stack.len() <= 1 {
                return Err(Diagnostic::error("Unmatched `)`", at));
            }
            if expecting_name {
                return Err(Diagnostic::expected("type", at));
            }
            let closed = stack.pop().expect("stack holds more than the root");
            let top = stack.last_mut().expect("the implicit root is always open");
            top.children.push(closed);
            expecting_name = false;
            continue;
        }

        if reader.match_literal(b",") {
            expecting_name = true;
            continue;
        }

        break;
    }

    if stack.len() > 1 {
        return Err(Diagnostic::error("Unmatched `(`", reader.pos()));
    }

    let root = stack.pop().expect("the implicit root is always open");
    let consumed = reader.pos() - start;
    trace!(consumed, children = root.children.len(), "parse_type done");
    Ok(match root.children.len() {
        0 => None,
        1 => Some(ParsedType {
            root: root.children[0],
            consumed,
        }),
        _ => Some(ParsedType { root, consumed }),
    })
}

/// `let` was just consumed: read the binding name, then the ranged-over
/// type name. Returns `(name, key)`.
fn read_binder<'a>(
    reader: &mut ByteReader<'a>,
    names: Option<&NameTrie<'a>>,
    arena: &'a Arena,
) -> ParseResult<(Span<'a>, Span<'a>)> {
    reader.scan_whitespace();
    let key_at = reader.pos();
    let key = reader.scan_identifier();
    if key.is_empty() {
        return Err(Diagnostic::expected("name for binding", key_at));
    }

    reader.scan_whitespace();
    let name_at = reader.pos();
    let name = reader.scan_identifier();
    if name.is_empty() {
        return Err(Diagnostic::expected("type for binding", name_at));
    }

    if let Some(names) = names {
        names.insert(arena, key);
    }
    Ok((name, key))
}
