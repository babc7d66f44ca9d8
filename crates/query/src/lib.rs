//! Shelfview Query - Grouping schema and list-query planning.
//!
//! This crate turns a user's grouping style plus filters into an immutable,
//! typed `ListPlan`, and executes that plan against a `Catalog` to produce
//! the sorted flat book rows the materializer consumes:
//!
//! - `domain`: typed expression tree (`DomainExpr`) and named `Domain`s
//! - `group`: `GroupKind`, `GroupDescriptor`, `Style` and its builder
//! - `filter`: predicate filters combined with AND at build time
//! - `key`: node-key fragment rendering and hierarchical prefix tests
//! - `builder`: `ListQueryBuilder` -> `ListPlan`
//! - `executor`: join expansion, filtering, collation-aware sorting
//!
//! Plans are plain data; unit tests assert on plan structure rather than on
//! any backing store's query dialect.

#![no_std]

extern crate alloc;

pub mod builder;
pub mod context;
pub mod domain;
pub mod executor;
pub mod filter;
pub mod group;
pub mod key;

pub use builder::{JoinSpec, LevelPlan, ListPlan, ListQueryBuilder};
pub use context::BookContext;
pub use domain::{
    AuthorField, BookField, Domain, DomainExpr, PublisherField, SeriesField, ShelfField, SortKey,
    SortOrder,
};
pub use executor::{execute, FlatRow};
pub use filter::Filter;
pub use group::{GroupDescriptor, GroupKind, SortDomain, Style, StyleBuilder};
