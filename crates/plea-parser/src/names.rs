//! Hash-routed symbol table.
//!
//! Declared identifiers are interned once into a 4-ary trie and addressed
//! by reference afterwards. The trie is routed by successive 2-bit slices
//! (most significant first) of a 64-bit hash of the key's bytes; the hash
//! only steers the search - equality at every visited node is full text
//! comparison, so colliding hashes cost extra probes but can never produce
//! a false match.

use std::cell::Cell;

use serde::Serialize;

use plea_arena::Arena;
use plea_common::Span;
use plea_common::limits::{HASH_SLICES_PER_HASH, TRIE_FANOUT};

use crate::ast::TypeNode;

const HASH_SEED: u64 = 0x100;
const HASH_MULT: u64 = 1_111_111_111_111_111_111;

/// Multiplicative mix over the identifier's bytes. Deterministic within a
/// run (no per-process randomization).
pub fn hash_identifier(bytes: &[u8]) -> u64 {
    let mut h = HASH_SEED;
    for &b in bytes {
        h ^= u64::from(b);
        h = h.wrapping_mul(HASH_MULT);
    }
    h
}

/// When every 2-bit slice of a hash has been consumed by collisions, the
/// walk continues with a successor hash derived from the exhausted one.
/// Probing stays deterministic and unbounded instead of degenerating into
/// a single child slot.
fn successor_hash(exhausted: u64) -> u64 {
    hash_identifier(&exhausted.to_le_bytes())
}

/// What a symbol was declared as. Fresh entries start as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    #[default]
    None,
    TypeDecl,
    Theorem,
    Axiom,
}

/// One interned identifier.
///
/// The trie stores the key by reference (no copy) and leaves kind and the
/// associated type tree unset; callers attach both after insertion.
pub struct Symbol<'a> {
    key: Span<'a>,
    kind: Cell<SymbolKind>,
    ty: Cell<Option<&'a TypeNode<'a>>>,
    children: [Cell<Option<&'a Symbol<'a>>>; TRIE_FANOUT],
}

impl<'a> Symbol<'a> {
    fn new(key: Span<'a>) -> Symbol<'a> {
        Symbol {
            key,
            kind: Cell::new(SymbolKind::None),
            ty: Cell::new(None),
            children: std::array::from_fn(|_| Cell::new(None)),
        }
    }

    pub fn key(&self) -> Span<'a> {
        self.key
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind.get()
    }

    pub fn set_kind(&self, kind: SymbolKind) {
        self.kind.set(kind);
    }

    pub fn ty(&self) -> Option<&'a TypeNode<'a>> {
        self.ty.get()
    }

    pub fn set_ty(&self, ty: &'a TypeNode<'a>) {
        self.ty.set(Some(ty));
    }
}

/// The symbol table: a trie of [`Symbol`]s rooted in a single slot.
///
/// Invariants: a key, once inserted, is always reachable by [`lookup`]
/// with the same walk; distinct keys never share a node.
///
/// [`lookup`]: NameTrie::lookup
pub struct NameTrie<'a> {
    root: Cell<Option<&'a Symbol<'a>>>,
}

impl<'a> NameTrie<'a> {
    pub fn new() -> NameTrie<'a> {
        NameTrie {
            root: Cell::new(None),
        }
    }

    /// Find `key` without creating it.
    pub fn lookup(&self, key: Span<'a>) -> Option<&'a Symbol<'a>> {
        self.walk(key, None)
    }

    /// Find `key`, allocating a fresh node from `arena` on a miss. Double
    /// insertion of the same text returns the original node.
    pub fn insert(&self, arena: &'a Arena, key: Span<'a>) -> &'a Symbol<'a> {
        match self.walk(key, Some(arena)) {
            Some(symbol) => symbol,
            None => unreachable!("trie walk in creation mode always yields a node"),
        }
    }

    fn walk(&self, key: Span<'a>, create: Option<&'a Arena>) -> Option<&'a Symbol<'a>> {
        let mut era = hash_identifier(key.as_bytes());
        let mut h = era;
        let mut slices_left = HASH_SLICES_PER_HASH;
        let mut slot = &self.root;

        loop {
            let Some(symbol) = slot.get() else {
                let arena = create?;
                let fresh: &'a Symbol<'a> = arena.alloc(Symbol::new(key));
                slot.set(Some(fresh));
                return Some(fresh);
            };
            if symbol.key == key {
                return Some(symbol);
            }
            if slices_left == 0 {
                era = successor_hash(era);
                h = era;
                slices_left = HASH_SLICES_PER_HASH;
            }
            let child = (h >> 62) as usize;
            h <<= 2;
            slices_left -= 1;
            slot = &symbol.children[child];
        }
    }

    /// Number of keys reachable from the root.
    pub fn len(&self) -> usize {
        fn count(node: Option<&Symbol<'_>>) -> usize {
            match node {
                None => 0,
                Some(symbol) => {
                    1 + symbol
                        .children
                        .iter()
                        .map(|child| count(child.get()))
                        .sum::<usize>()
                }
            }
        }
        count(self.root.get())
    }

    pub fn is_empty(&self) -> bool {
        self.root.get().is_none()
    }
}

impl<'a> Default for NameTrie<'a> {
    fn default() -> NameTrie<'a> {
        NameTrie::new()
    }
}
