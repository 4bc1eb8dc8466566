//! Bump-allocating memory arena for the plea front-end.
//!
//! This crate provides the storage layer the parser and symbol table are
//! built on:
//! - `Region` - one fixed-capacity heap buffer, bump-allocated front to back
//! - `RegionManager` - a growable, reusable pool of regions
//! - `Arena` - the allocation handle (`alloc` / `alloc_raw` / `reset`)
//! - `ArenaVec` - a growable array living entirely in arena memory
//!
//! Objects carved from an arena are never released individually; the whole
//! arena is either reset (regions become reusable) or dropped (every region
//! buffer freed once, then the pool).

#![allow(unsafe_code)]

mod arena;
mod region;
mod vec;

pub use arena::{Arena, ArenaStats, DEFAULT_MIN_REGION_CAP, RegionStats};
pub use region::{Region, RegionManager};
pub use vec::ArenaVec;
