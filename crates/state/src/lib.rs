//! Shelfview State - Expansion and visibility state for booklists.
//!
//! The materialized list never changes shape after a build; everything the
//! user does to the tree (tap to expand, collapse all, jump to a book)
//! mutates the node state store instead:
//!
//! - `NodeStateStore`: one entry per materialized row with the expansion
//!   flag and the derived visibility; built once per list from a
//!   `RebuildPolicy`, then mutated incrementally
//! - navigator reads: visible count, windowed row ids, node lookup with a
//!   lazily recomputed list position, nodes-for-book, next-matching scan
//! - `ExpansionSnapshot`: the serializable (level, node_key) -> expanded
//!   mapping that lets a later build restore the user's expansion
//!
//! Invariant held after every mutation: a row is visible exactly when all
//! of its strict ancestors are expanded.

#![no_std]

extern crate alloc;

mod navigator;
mod snapshot;
mod store;

pub use navigator::PositionedNode;
pub use snapshot::{ExpansionSnapshot, SnapshotEntry};
pub use store::{NodeState, NodeStateStore, RebuildPolicy};
