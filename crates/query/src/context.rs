//! Joined book context.

use shelfview_catalog::{Author, AuthorLink, Book, Bookshelf, Publisher, Series, SeriesLink, ShelfLink};

/// One joined (book, author?, series?, publisher?, shelf?) combination.
///
/// The executor produces one context per combination the join expansion
/// yields; domain expressions and filters evaluate against it. Joined
/// entities are optional: a missing one evaluates to Null, mirroring a
/// left join.
#[derive(Clone, Copy, Debug)]
pub struct BookContext<'a> {
    pub book: &'a Book,
    pub author: Option<&'a Author>,
    pub author_link: Option<&'a AuthorLink>,
    pub series: Option<&'a Series>,
    pub series_link: Option<&'a SeriesLink>,
    pub publisher: Option<&'a Publisher>,
    /// The shelf this context row belongs to, under per-shelf expansion.
    pub shelf: Option<&'a Bookshelf>,
    /// Every shelf link of the book, for shelf-membership filters that
    /// apply without per-shelf expansion.
    pub shelf_links: &'a [ShelfLink],
}

impl<'a> BookContext<'a> {
    /// Creates a context with only the book joined in.
    pub fn book_only(book: &'a Book) -> Self {
        Self {
            book,
            author: None,
            author_link: None,
            series: None,
            series_link: None,
            publisher: None,
            shelf: None,
            shelf_links: &[],
        }
    }
}
