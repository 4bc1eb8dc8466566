//! Tests for the directive dispatcher.

use std::io::Write;

use plea_arena::Arena;
use plea_cli::args::CliArgs;
use plea_cli::driver::{RunOutcome, process_source, run};
use plea_common::Span;
use plea_parser::{NameTrie, SymbolKind};

#[test]
fn type_axiom_and_theorem_declarations() {
    let arena = Arena::with_min_region_cap(1 << 16);
    let names = NameTrie::new();
    let source = b"\
type Nat
type Bool

axiom zero_is_nat Nat -> Bool
theorem trivial Nat -> Nat
proof
    return Nat
";
    let decls = process_source(&arena, &names, source).expect("source is well-formed");
    assert_eq!(decls.len(), 4);

    assert_eq!(decls[0].name.as_bytes(), b"Nat");
    assert_eq!(decls[0].kind, SymbolKind::TypeDecl);
    assert!(decls[0].signature.is_none());

    assert_eq!(decls[2].name.as_bytes(), b"zero_is_nat");
    assert_eq!(decls[2].kind, SymbolKind::Axiom);
    let signature = decls[2].signature.expect("axioms carry a signature");
    assert_eq!(signature.children[0].to_string(), "Nat");
    assert_eq!(signature.children[1].to_string(), "Bool");

    assert_eq!(decls[3].kind, SymbolKind::Theorem);
}

#[test]
fn declared_names_are_registered_with_their_kind() {
    let arena = Arena::with_min_region_cap(1 << 16);
    let names = NameTrie::new();
    let source = b"type Nat\naxiom ax Nat -> Nat\ntheorem th Nat -> Nat\nproof return Nat";
    process_source(&arena, &names, source).expect("source is well-formed");

    let nat = names.lookup(Span::new(b"Nat")).expect("Nat registered");
    assert_eq!(nat.kind(), SymbolKind::TypeDecl);
    let ax = names.lookup(Span::new(b"ax")).expect("ax registered");
    assert_eq!(ax.kind(), SymbolKind::Axiom);
    assert!(ax.ty().is_some());
    let th = names.lookup(Span::new(b"th")).expect("th registered");
    assert_eq!(th.kind(), SymbolKind::Theorem);
    assert!(names.lookup(Span::new(b"missing")).is_none());
}

#[test]
fn comments_are_skipped_anywhere_between_directives() {
    let arena = Arena::with_min_region_cap(1 << 16);
    let names = NameTrie::new();
    let source = b"\
# leading comment
type Nat
# between directives
theorem th Nat -> Nat
proof
# inside a proof body
    return Nat
# trailing comment";
    let decls = process_source(&arena, &names, source).expect("comments are skipped");
    assert_eq!(decls.len(), 2);
}

#[test]
fn proof_body_ends_at_the_next_directive() {
    let arena = Arena::with_min_region_cap(1 << 16);
    let names = NameTrie::new();
    let source = b"\
theorem first Nat -> Nat
proof
    step(Nat)
    return Nat
axiom second Nat -> Nat
";
    let decls = process_source(&arena, &names, source).expect("both declarations parse");
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[1].name.as_bytes(), b"second");
    assert_eq!(decls[1].kind, SymbolKind::Axiom);
}

#[test]
fn binder_types_flow_through_declarations() {
    let arena = Arena::with_min_region_cap(1 << 16);
    let names = NameTrie::new();
    let source = b"axiom all_eq forall(let x Nat, eq(x, x)) -> true";
    let decls = process_source(&arena, &names, source).expect("binder parses");
    let signature = decls[0].signature.expect("signature present");
    let forall = signature.children[0];
    assert_eq!(forall.children[0].key.as_bytes(), b"x");
    assert_eq!(forall.children[0].name.as_bytes(), b"Nat");
    // The binder key was interned while parsing.
    assert!(names.lookup(Span::new(b"x")).is_some());
}

#[test]
fn redeclaration_last_kind_wins() {
    let arena = Arena::with_min_region_cap(1 << 16);
    let names = NameTrie::new();
    let source = b"type thing\naxiom thing Nat -> Nat";
    process_source(&arena, &names, source).expect("both parse");
    let symbol = names.lookup(Span::new(b"thing")).expect("registered");
    assert_eq!(symbol.kind(), SymbolKind::Axiom);
}

#[test]
fn missing_keyword_reports_the_offset() {
    let arena = Arena::with_min_region_cap(1 << 16);
    let names = NameTrie::new();
    let err = process_source(&arena, &names, b"  ->").expect_err("not a directive");
    assert_eq!(err.message, "Expected keyword");
    assert_eq!(err.offset, 2);
}

#[test]
fn invalid_keyword_is_fatal() {
    let arena = Arena::with_min_region_cap(1 << 16);
    let names = NameTrie::new();
    let err = process_source(&arena, &names, b"lemma nope Nat -> Nat").expect_err("bad keyword");
    assert_eq!(err.message, "Invalid keyword");
    assert_eq!(err.offset, 0);
}

#[test]
fn missing_arrow_is_fatal() {
    let arena = Arena::with_min_region_cap(1 << 16);
    let names = NameTrie::new();
    let err = process_source(&arena, &names, b"axiom f Nat Bool").expect_err("no arrow");
    assert_eq!(err.message, "Expected `->`");
    assert_eq!(err.offset, 12);
}

#[test]
fn missing_proof_is_fatal() {
    let arena = Arena::with_min_region_cap(1 << 16);
    let names = NameTrie::new();
    let err = process_source(&arena, &names, b"theorem t Nat -> Nat").expect_err("no proof");
    assert_eq!(err.message, "Expected proof for theorem");
    assert_eq!(err.offset, 20);
}

#[test]
fn parse_errors_propagate_with_absolute_offsets() {
    let arena = Arena::with_min_region_cap(1 << 16);
    let names = NameTrie::new();
    let source = b"axiom broken pair(Nat -> Nat";
    let err = process_source(&arena, &names, source).expect_err("unmatched open");
    assert_eq!(err.message, "Unmatched `(`");
}

#[test]
fn run_processes_files_and_reports_success() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("basics.plea");
    let mut file = std::fs::File::create(&path).expect("create file");
    file.write_all(b"type Nat\naxiom ax Nat -> Nat\n")
        .expect("write file");

    let args = CliArgs {
        files: vec![path],
        quiet: true,
        ..CliArgs::default()
    };
    let outcome = run(&args).expect("driver runs");
    assert_eq!(outcome, RunOutcome::Success);
}

#[test]
fn run_reuses_the_arena_across_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut files = Vec::new();
    for i in 0..3 {
        let path = dir.path().join(format!("mod{i}.plea"));
        std::fs::write(&path, "type Nat\naxiom ax Nat -> Nat\n").expect("write file");
        files.push(path);
    }
    let args = CliArgs {
        files,
        quiet: true,
        ..CliArgs::default()
    };
    assert_eq!(run(&args).expect("driver runs"), RunOutcome::Success);
}

#[test]
fn run_fails_on_the_first_diagnostic() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.plea");
    std::fs::write(&path, "axiom broken Nat Nat\n").expect("write file");

    let args = CliArgs {
        files: vec![path],
        quiet: true,
        ..CliArgs::default()
    };
    assert_eq!(run(&args).expect("driver runs"), RunOutcome::Failed);
}

#[test]
fn run_errors_on_unreadable_input() {
    let args = CliArgs {
        files: vec!["/nonexistent/missing.plea".into()],
        quiet: true,
        ..CliArgs::default()
    };
    assert!(run(&args).is_err());
}
