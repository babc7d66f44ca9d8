//! In-memory catalog implementation.

use crate::catalog::Catalog;
use crate::entity::{
    Author, AuthorLink, Book, Bookshelf, Publisher, PublisherLink, Series, SeriesLink, ShelfLink,
};
use crate::{AuthorId, BookId, BookshelfId, PublisherId, SeriesId};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// An in-memory catalog: entity maps keyed by id plus per-book link
/// vectors. Books iterate in id order (BTreeMap) so list builds are
/// deterministic; link vectors are kept sorted by position on insert.
#[derive(Default)]
pub struct MemoryCatalog {
    books: BTreeMap<BookId, Book>,
    authors: HashMap<AuthorId, Author>,
    series: HashMap<SeriesId, Series>,
    publishers: HashMap<PublisherId, Publisher>,
    bookshelves: HashMap<BookshelfId, Bookshelf>,
    author_links: HashMap<BookId, Vec<AuthorLink>>,
    series_links: HashMap<BookId, Vec<SeriesLink>>,
    publisher_links: HashMap<BookId, Vec<PublisherLink>>,
    shelf_links: HashMap<BookId, Vec<ShelfLink>>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a book.
    pub fn add_book(&mut self, book: Book) {
        self.books.insert(book.id, book);
    }

    /// Adds or replaces an author.
    pub fn add_author(&mut self, author: Author) {
        self.authors.insert(author.id, author);
    }

    /// Adds or replaces a series.
    pub fn add_series(&mut self, series: Series) {
        self.series.insert(series.id, series);
    }

    /// Adds or replaces a publisher.
    pub fn add_publisher(&mut self, publisher: Publisher) {
        self.publishers.insert(publisher.id, publisher);
    }

    /// Adds or replaces a bookshelf.
    pub fn add_bookshelf(&mut self, shelf: Bookshelf) {
        self.bookshelves.insert(shelf.id, shelf);
    }

    /// Links a book to an author.
    pub fn link_author(&mut self, link: AuthorLink) {
        let links = self.author_links.entry(link.book_id).or_default();
        links.push(link);
        links.sort_by_key(|l| l.position);
    }

    /// Links a book to a series.
    pub fn link_series(&mut self, link: SeriesLink) {
        let links = self.series_links.entry(link.book_id).or_default();
        links.push(link);
        links.sort_by_key(|l| l.position);
    }

    /// Links a book to a publisher.
    pub fn link_publisher(&mut self, link: PublisherLink) {
        let links = self.publisher_links.entry(link.book_id).or_default();
        links.push(link);
        links.sort_by_key(|l| l.position);
    }

    /// Puts a book on a bookshelf.
    pub fn link_shelf(&mut self, link: ShelfLink) {
        self.shelf_links.entry(link.book_id).or_default().push(link);
    }

    /// Number of books in the catalog.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }
}

impl Catalog for MemoryCatalog {
    fn books(&self) -> Vec<&Book> {
        self.books.values().collect()
    }

    fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id)
    }

    fn author(&self, id: AuthorId) -> Option<&Author> {
        self.authors.get(&id)
    }

    fn series(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(&id)
    }

    fn publisher(&self, id: PublisherId) -> Option<&Publisher> {
        self.publishers.get(&id)
    }

    fn bookshelf(&self, id: BookshelfId) -> Option<&Bookshelf> {
        self.bookshelves.get(&id)
    }

    fn author_links(&self, book: BookId) -> &[AuthorLink] {
        self.author_links.get(&book).map(Vec::as_slice).unwrap_or(&[])
    }

    fn series_links(&self, book: BookId) -> &[SeriesLink] {
        self.series_links.get(&book).map(Vec::as_slice).unwrap_or(&[])
    }

    fn publisher_links(&self, book: BookId) -> &[PublisherLink] {
        self.publisher_links.get(&book).map(Vec::as_slice).unwrap_or(&[])
    }

    fn shelf_links(&self, book: BookId) -> &[ShelfLink] {
        self.shelf_links.get(&book).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AUTHOR_TYPE_WRITER;
    use alloc::string::ToString;

    fn sample_book(id: BookId, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            isbn: "".into(),
            read: false,
            rating: 0,
            language: "eng".into(),
            loaned_to: None,
            publication_year: None,
            date_added: 0,
        }
    }

    #[test]
    fn test_books_iterate_in_id_order() {
        let mut cat = MemoryCatalog::new();
        cat.add_book(sample_book(3, "C"));
        cat.add_book(sample_book(1, "A"));
        cat.add_book(sample_book(2, "B"));

        let ids: Vec<BookId> = cat.books().iter().map(|b| b.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn test_author_links_sorted_by_position() {
        let mut cat = MemoryCatalog::new();
        cat.link_author(AuthorLink {
            book_id: 1,
            author_id: 20,
            position: 2,
            author_type: AUTHOR_TYPE_WRITER,
        });
        cat.link_author(AuthorLink {
            book_id: 1,
            author_id: 10,
            position: 1,
            author_type: AUTHOR_TYPE_WRITER,
        });

        let links = cat.author_links(1);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].author_id, 10);
        assert_eq!(links[1].author_id, 20);
    }

    #[test]
    fn test_missing_links_are_empty() {
        let cat = MemoryCatalog::new();
        assert!(cat.author_links(99).is_empty());
        assert!(cat.series_links(99).is_empty());
        assert!(cat.shelf_links(99).is_empty());
    }
}
