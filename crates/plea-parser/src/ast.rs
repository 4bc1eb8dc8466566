//! The type-expression tree.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use plea_arena::{Arena, ArenaVec};
use plea_common::Span;

/// One node of a type expression: `name(child, child, ...)`.
///
/// `key` is the binder name from the `let key name` form and is empty for
/// ordinary nodes. Children are ordered; position carries meaning (they are
/// positional type arguments). The tree is a pure forward tree - no sharing,
/// no cycles - and is owned transitively by the arena it was carved from.
#[derive(Debug)]
pub struct TypeNode<'a> {
    pub name: Span<'a>,
    pub key: Span<'a>,
    pub children: ArenaVec<'a, &'a TypeNode<'a>>,
}

impl<'a> TypeNode<'a> {
    pub fn new(arena: &'a Arena, name: Span<'a>, key: Span<'a>) -> TypeNode<'a> {
        TypeNode {
            name,
            key,
            children: ArenaVec::new(arena),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_binder(&self) -> bool {
        !self.key.is_empty()
    }
}

/// Structural equality: same name, same binder key, same children in the
/// same order.
impl PartialEq for TypeNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.key == other.key
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(other.children.iter())
                .all(|(a, b)| a == b)
    }
}

impl Eq for TypeNode<'_> {}

/// Canonical rendering: `name` for a leaf, `name(child, child)` otherwise.
/// Reparsing this output yields a structurally identical tree for
/// binder-free nodes.
impl fmt::Display for TypeNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.children.is_empty() {
            write!(f, "(")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{child}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl Serialize for TypeNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TypeNode", 3)?;
        state.serialize_field("name", &self.name)?;
        let key = (!self.key.is_empty()).then_some(self.key);
        state.serialize_field("key", &key)?;
        state.serialize_field("children", &self.children.as_slice())?;
        state.end()
    }
}
