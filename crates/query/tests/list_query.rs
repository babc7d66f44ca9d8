//! Integration tests for plan building and execution against an
//! in-memory catalog.

use shelfview_catalog::{
    Author, AuthorLink, Book, Bookshelf, MemoryCatalog, Series, SeriesLink, ShelfLink,
    AUTHOR_TYPE_WRITER,
};
use shelfview_core::Value;
use shelfview_query::{execute, Filter, GroupKind, ListQueryBuilder, StyleBuilder};

fn book(id: i64, title: &str) -> Book {
    Book {
        id,
        title: title.into(),
        isbn: "".into(),
        read: false,
        rating: 0,
        language: "eng".into(),
        loaned_to: None,
        publication_year: None,
        date_added: 0,
    }
}

fn author_link(book_id: i64, author_id: i64, position: u32) -> AuthorLink {
    AuthorLink {
        book_id,
        author_id,
        position,
        author_type: AUTHOR_TYPE_WRITER,
    }
}

/// Three books by two authors; one author wrote two of them.
fn small_catalog() -> MemoryCatalog {
    let mut cat = MemoryCatalog::new();
    cat.add_author(Author {
        id: 1,
        family_name: "Le Guin".into(),
        given_names: "Ursula K.".into(),
    });
    cat.add_author(Author {
        id: 2,
        family_name: "Zelazny".into(),
        given_names: "Roger".into(),
    });
    cat.add_book(book(10, "A Wizard of Earthsea"));
    cat.add_book(book(11, "The Dispossessed"));
    cat.add_book(book(12, "Lord of Light"));
    cat.link_author(author_link(10, 1, 1));
    cat.link_author(author_link(11, 1, 1));
    cat.link_author(author_link(12, 2, 1));
    cat
}

#[test]
fn single_author_grouping_produces_one_row_per_book() {
    let style = StyleBuilder::new("by author")
        .add_group(GroupKind::Author)
        .unwrap()
        .build();
    let plan = ListQueryBuilder::new(&style).build().unwrap();
    let rows = execute(&plan, &small_catalog()).unwrap();

    assert_eq!(rows.len(), 3);
    // Sorted by author first: Le Guin's two books precede Zelazny's.
    assert_eq!(rows[0].book_id, 10);
    assert_eq!(rows[1].book_id, 11);
    assert_eq!(rows[2].book_id, 12);
}

#[test]
fn each_author_expansion_duplicates_shared_books() {
    let mut cat = small_catalog();
    // "Lord of Light" gains a co-author.
    cat.link_author(author_link(12, 1, 2));

    let style = StyleBuilder::new("each author")
        .add_group(GroupKind::Author)
        .unwrap()
        .books_under_each_author(true)
        .build();
    let plan = ListQueryBuilder::new(&style).build().unwrap();
    let rows = execute(&plan, &cat).unwrap();

    // Book 12 appears once under each of its two authors.
    assert_eq!(rows.len(), 4);
    let twelves = rows.iter().filter(|r| r.book_id == 12).count();
    assert_eq!(twelves, 2);
}

#[test]
fn primary_author_only_without_expansion() {
    let mut cat = small_catalog();
    cat.link_author(author_link(12, 1, 2));

    let style = StyleBuilder::new("primary only")
        .add_group(GroupKind::Author)
        .unwrap()
        .build();
    let plan = ListQueryBuilder::new(&style).build().unwrap();
    let rows = execute(&plan, &cat).unwrap();

    assert_eq!(rows.len(), 3);
    // Book 12 sorts under Zelazny, its position-1 author.
    let key_idx = plan.domain_index("a_key").unwrap();
    let row12 = rows.iter().find(|r| r.book_id == 12).unwrap();
    assert_eq!(row12.values[key_idx], Value::Int64(2));
}

#[test]
fn keyword_filter_restricts_rows() {
    let style = StyleBuilder::new("filtered")
        .add_group(GroupKind::Author)
        .unwrap()
        .build();
    let plan = ListQueryBuilder::new(&style)
        .filter(Filter::Keywords("earthsea".into()))
        .build()
        .unwrap();
    let rows = execute(&plan, &small_catalog()).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].book_id, 10);
}

#[test]
fn bookshelf_filter_expands_and_restricts() {
    let mut cat = small_catalog();
    cat.add_bookshelf(Bookshelf {
        id: 5,
        name: "To read".into(),
    });
    cat.link_shelf(ShelfLink {
        book_id: 10,
        bookshelf_id: 5,
    });

    let style = StyleBuilder::new("shelved")
        .add_group(GroupKind::Author)
        .unwrap()
        .build();
    let plan = ListQueryBuilder::new(&style).bookshelf(5).build().unwrap();
    let rows = execute(&plan, &cat).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].book_id, 10);
}

#[test]
fn series_grouping_sorts_by_number_within_series() {
    let mut cat = MemoryCatalog::new();
    cat.add_series(Series {
        id: 1,
        title: "Earthsea".into(),
    });
    cat.add_book(book(1, "The Tombs of Atuan"));
    cat.add_book(book(2, "A Wizard of Earthsea"));
    cat.link_series(SeriesLink {
        book_id: 1,
        series_id: 1,
        position: 1,
        number: "2".into(),
    });
    cat.link_series(SeriesLink {
        book_id: 2,
        series_id: 1,
        position: 1,
        number: "1".into(),
    });

    let style = StyleBuilder::new("by series")
        .add_group(GroupKind::Series)
        .unwrap()
        .build();
    let plan = ListQueryBuilder::new(&style).build().unwrap();
    let rows = execute(&plan, &cat).unwrap();

    // Number "1" before number "2", overriding title order.
    assert_eq!(rows[0].book_id, 2);
    assert_eq!(rows[1].book_id, 1);
}

#[test]
fn collation_orders_titles_case_insensitively() {
    let mut cat = MemoryCatalog::new();
    cat.add_book(book(1, "zebra"));
    cat.add_book(book(2, "Apple"));

    let style = StyleBuilder::new("flat").build();
    let plan = ListQueryBuilder::new(&style).build().unwrap();
    let rows = execute(&plan, &cat).unwrap();

    assert_eq!(rows[0].book_id, 2);
    assert_eq!(rows[1].book_id, 1);
}
