//! Shelfview Session - The owning booklist session.
//!
//! `ListSession` ties the engine together: it builds the plan from a
//! style, executes it against a catalog, materializes the flattened tree
//! and seeds the node state store, then serves every read and mutation
//! the list UI needs. One session exclusively owns one materialized list
//! plus its node state; `close()` drops both and is idempotent.
//!
//! # Example
//!
//! ```rust
//! use shelfview_catalog::MemoryCatalog;
//! use shelfview_query::{GroupKind, StyleBuilder};
//! use shelfview_session::ListSession;
//! use shelfview_state::RebuildPolicy;
//!
//! let catalog = MemoryCatalog::new();
//! let style = StyleBuilder::new("by author")
//!     .add_group(GroupKind::Author)
//!     .unwrap()
//!     .build();
//! let mut session = ListSession::build(
//!     &style,
//!     &catalog,
//!     None,
//!     Vec::new(),
//!     RebuildPolicy::AlwaysExpanded,
//!     None,
//! )
//! .unwrap();
//! assert_eq!(session.visible_count().unwrap(), 0);
//! session.close();
//! session.close(); // idempotent
//! ```

#![no_std]

extern crate alloc;

mod session;

pub use session::{ListRowView, ListSession};
