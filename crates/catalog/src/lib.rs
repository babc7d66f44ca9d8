//! Shelfview Catalog - Domain entities and catalog repositories.
//!
//! This crate defines the source-data side of the booklist engine:
//!
//! - `entity`: Book, Author, Series, Publisher, Bookshelf records and the
//!   link rows tying them together (with position and author-type data)
//! - `Catalog`: the read-only repository trait the list build consumes
//! - `MemoryCatalog`: an in-memory, indexed implementation for embedders
//!   that hold the library in memory, and for tests
//!
//! The engine never writes through the catalog; one list build reads a
//! consistent snapshot of it and owns everything it derives from there on.

#![no_std]

extern crate alloc;

mod catalog;
pub mod entity;
mod memory;

pub use catalog::Catalog;
pub use entity::{
    Author, AuthorLink, Book, Bookshelf, Publisher, PublisherLink, Series, SeriesLink, ShelfLink,
    AUTHOR_TYPE_EDITOR, AUTHOR_TYPE_ILLUSTRATOR, AUTHOR_TYPE_TRANSLATOR, AUTHOR_TYPE_UNKNOWN,
    AUTHOR_TYPE_WRITER,
};
pub use memory::MemoryCatalog;

/// Identifier types for catalog entities.
pub type BookId = i64;
pub type AuthorId = i64;
pub type SeriesId = i64;
pub type PublisherId = i64;
pub type BookshelfId = i64;
