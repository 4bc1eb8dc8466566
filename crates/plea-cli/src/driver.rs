//! The directive dispatcher.
//!
//! Walks a source buffer declaration by declaration, hands type expressions
//! to `plea_parser::parse_type`, and registers every declared name in the
//! symbol trie under its kind. The first diagnostic aborts the run; there
//! is no recovery.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use plea_arena::Arena;
use plea_common::{Diagnostic, ParseResult, Span};
use plea_parser::{NameTrie, SymbolKind, TypeNode, parse_type};
use plea_scanner::ByteReader;

use crate::args::CliArgs;

/// Whether a run got through every file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Failed,
}

impl RunOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunOutcome::Success => ExitCode::SUCCESS,
            RunOutcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// One successfully processed declaration.
#[derive(Debug, Serialize)]
pub struct Declaration<'a> {
    pub name: Span<'a>,
    pub kind: SymbolKind,
    /// `->` node with the argument and result trees as its two children;
    /// absent for `type` declarations.
    pub signature: Option<&'a TypeNode<'a>>,
}

/// Process every file in `args`, reusing one arena across files.
pub fn run(args: &CliArgs) -> anyhow::Result<RunOutcome> {
    let mut arena = match args.min_region_cap {
        Some(cap) => Arena::with_min_region_cap(cap),
        None => Arena::new(),
    };

    for (i, path) in args.files.iter().enumerate() {
        if i > 0 {
            // Retires the previous file's trees and symbols; their regions
            // are found again by the reuse search.
            arena.reset();
        }
        let source = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let _span = tracing::debug_span!("process_file", file = %path.display()).entered();

        let names = NameTrie::new();
        match process_source(&arena, &names, &source) {
            Ok(decls) => emit(args, path, &decls)?,
            Err(diagnostic) => {
                report(path, &diagnostic);
                return Ok(RunOutcome::Failed);
            }
        }
    }
    Ok(RunOutcome::Success)
}

/// Run the directive loop over one source buffer.
///
/// Grammar at this level: `#` comments to end of line, and the directives
/// `type NAME`, `axiom NAME TYPE -> TYPE`,
/// `theorem NAME TYPE -> TYPE proof STEP...` where a proof step is an
/// optional `return` keyword followed by a type expression. Declared names
/// are registered in `names` after their declaration parses.
pub fn process_source<'a>(
    arena: &'a Arena,
    names: &NameTrie<'a>,
    source: &'a [u8],
) -> ParseResult<Vec<Declaration<'a>>> {
    let mut reader = ByteReader::new(source);
    let mut decls = Vec::new();

    while !reader.is_eof() {
        reader.scan_whitespace();
        if reader.is_eof() {
            break;
        }
        if reader.match_literal(b"#") {
            reader.skip_line();
            continue;
        }

        let at = reader.pos();
        let keyword = reader.scan_identifier();
        if keyword.is_empty() {
            return Err(Diagnostic::expected("keyword", at));
        }

        match keyword.as_bytes() {
            b"type" => {
                let name = read_name(&mut reader)?;
                register(arena, names, name, SymbolKind::TypeDecl, None);
                decls.push(Declaration {
                    name,
                    kind: SymbolKind::TypeDecl,
                    signature: None,
                });
            }
            b"axiom" | b"theorem" => {
                let is_axiom = keyword.as_bytes() == b"axiom";
                let name = read_name(&mut reader)?;
                let signature = read_signature(arena, names, &mut reader)?;

                let kind = if is_axiom {
                    SymbolKind::Axiom
                } else {
                    SymbolKind::Theorem
                };
                register(arena, names, name, kind, Some(signature));
                decls.push(Declaration {
                    name,
                    kind,
                    signature: Some(signature),
                });

                if !is_axiom {
                    read_proof(arena, names, &mut reader)?;
                }
            }
            _ => return Err(Diagnostic::error("Invalid keyword", at)),
        }
    }

    Ok(decls)
}

fn read_name<'a>(reader: &mut ByteReader<'a>) -> ParseResult<Span<'a>> {
    reader.scan_whitespace();
    let at = reader.pos();
    let name = reader.scan_identifier();
    if name.is_empty() {
        return Err(Diagnostic::expected("identifier", at));
    }
    Ok(name)
}

/// `TYPE -> TYPE`, returned as a `->` node with two children.
fn read_signature<'a>(
    arena: &'a Arena,
    names: &NameTrie<'a>,
    reader: &mut ByteReader<'a>,
) -> ParseResult<&'a TypeNode<'a>> {
    reader.scan_whitespace();
    let args_at = reader.pos();
    let Some(arg) = parse_type(arena, Some(names), reader)? else {
        return Err(Diagnostic::expected("type", args_at));
    };

    reader.scan_whitespace();
    let arrow_at = reader.pos();
    if !reader.match_literal(b"->") {
        return Err(Diagnostic::expected("`->`", arrow_at));
    }

    reader.scan_whitespace();
    let result_at = reader.pos();
    let Some(result) = parse_type(arena, Some(names), reader)? else {
        return Err(Diagnostic::expected("type", result_at));
    };

    let signature = arena.alloc(TypeNode::new(arena, Span::new(b"->"), Span::empty()));
    signature.children.push(arg.root);
    signature.children.push(result.root);
    Ok(signature)
}

/// Consume a theorem's proof body without verifying anything: steps are an
/// optional `return` keyword followed by a type expression, and the body
/// ends at the next directive keyword or end of input. Comment lines are
/// allowed between steps.
fn read_proof<'a>(
    arena: &'a Arena,
    names: &NameTrie<'a>,
    reader: &mut ByteReader<'a>,
) -> ParseResult<()> {
    reader.scan_whitespace();
    let at = reader.pos();
    if !reader.match_literal_identifier(b"proof") {
        return Err(Diagnostic::expected("proof for theorem", at));
    }

    let mut steps = 0_usize;
    loop {
        reader.scan_whitespace();
        if reader.is_eof() || at_directive(reader) {
            break;
        }
        if reader.match_literal(b"#") {
            reader.skip_line();
            continue;
        }
        reader.match_literal_identifier(b"return");
        reader.scan_whitespace();
        let step_at = reader.pos();
        if parse_type(arena, Some(names), reader)?.is_none() {
            return Err(Diagnostic::expected("type", step_at));
        }
        steps += 1;
    }
    debug!(steps, "consumed proof body");
    Ok(())
}

fn at_directive(reader: &ByteReader<'_>) -> bool {
    let mut probe = *reader;
    let ident = probe.scan_identifier();
    matches!(ident.as_bytes(), b"type" | b"axiom" | b"theorem")
}

fn register<'a>(
    arena: &'a Arena,
    names: &NameTrie<'a>,
    name: Span<'a>,
    kind: SymbolKind,
    signature: Option<&'a TypeNode<'a>>,
) {
    let symbol = names.insert(arena, name);
    if symbol.kind() != SymbolKind::None {
        debug!(name = %name, ?kind, "re-declaring an existing name");
    }
    symbol.set_kind(kind);
    if let Some(signature) = signature {
        symbol.set_ty(signature);
    }
}

fn emit(args: &CliArgs, path: &Path, decls: &[Declaration<'_>]) -> anyhow::Result<()> {
    if args.emit_ast {
        let doc = serde_json::json!({
            "file": path.display().to_string(),
            "declarations": decls,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }
    if args.quiet {
        return Ok(());
    }
    for decl in decls {
        match decl.signature {
            Some(signature) => println!(
                "{} {}: {} -> {}",
                keyword(decl.kind),
                decl.name,
                signature.children[0],
                signature.children[1],
            ),
            None => println!("{} {}", keyword(decl.kind), decl.name),
        }
    }
    Ok(())
}

fn keyword(kind: SymbolKind) -> &'static str {
    match kind {
        SymbolKind::TypeDecl => "type",
        SymbolKind::Axiom => "axiom",
        SymbolKind::Theorem => "theorem",
        SymbolKind::None => "name",
    }
}

#[allow(clippy::print_stderr)]
fn report(path: &Path, diagnostic: &Diagnostic) {
    eprintln!(
        "{}: {} in {}",
        "error".red().bold(),
        diagnostic,
        path.display()
    );
}
