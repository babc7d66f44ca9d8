//! Shelfview List - Materialized booklist table.
//!
//! This crate owns the persisted side of one list build:
//!
//! - `ListTable`: the flattened tree rows in display order, plus the
//!   book-id and node-key indexes and the memoized book counts
//! - `materialize`: the streaming group-break pass that turns the sorted
//!   flat select into header + book rows in a single sweep
//! - `update_column`: narrow in-place updates for columns that do not
//!   affect grouping or sorting, so a field edit never forces a rebuild
//!
//! A `ListTable` is immutable after materialization except through
//! `update_column`; expansion state lives elsewhere and never touches it.

#![no_std]

extern crate alloc;

mod materializer;
mod table;
mod updater;

pub use materializer::materialize;
pub use table::{ListTable, MaterializedRow};
pub use updater::update_column;
