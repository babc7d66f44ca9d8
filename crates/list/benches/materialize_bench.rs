//! Benchmarks for list materialization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shelfview_catalog::{Author, AuthorLink, Book, MemoryCatalog, Series, SeriesLink, AUTHOR_TYPE_WRITER};
use shelfview_list::materialize;
use shelfview_query::{execute, GroupKind, ListPlan, ListQueryBuilder, StyleBuilder};

/// A synthetic library: `size` books spread over 40 authors and 15 series.
fn synthetic_catalog(size: usize) -> MemoryCatalog {
    let mut cat = MemoryCatalog::new();
    for author in 1..=40i64 {
        cat.add_author(Author {
            id: author,
            family_name: format!("Author{:02}", author),
            given_names: "A.".into(),
        });
    }
    for series in 1..=15i64 {
        cat.add_series(Series {
            id: series,
            title: format!("Series{:02}", series),
        });
    }
    for i in 0..size {
        let id = i as i64 + 1;
        cat.add_book(Book {
            id,
            title: format!("Book {:05}", i),
            isbn: "".into(),
            read: i % 3 == 0,
            rating: (i % 6) as i64,
            language: "eng".into(),
            loaned_to: None,
            publication_year: Some(1950 + (i % 70) as i64),
            date_added: i as i64,
        });
        cat.link_author(AuthorLink {
            book_id: id,
            author_id: (i % 40) as i64 + 1,
            position: 1,
            author_type: AUTHOR_TYPE_WRITER,
        });
        if i % 2 == 0 {
            cat.link_series(SeriesLink {
                book_id: id,
                series_id: (i % 15) as i64 + 1,
                position: 1,
                number: format!("{}", i % 9 + 1),
            });
        }
    }
    cat
}

fn author_series_plan() -> ListPlan {
    let style = StyleBuilder::new("bench")
        .add_group(GroupKind::Author)
        .unwrap()
        .add_group(GroupKind::Series)
        .unwrap()
        .build();
    ListQueryBuilder::new(&style).build().unwrap()
}

fn bench_flat_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_select");
    let plan = author_series_plan();

    for size in [100, 1000, 5000] {
        let cat = synthetic_catalog(size);
        group.bench_with_input(BenchmarkId::new("execute", size), &cat, |b, cat| {
            b.iter(|| execute(black_box(&plan), cat).unwrap())
        });
    }

    group.finish();
}

fn bench_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize");
    let plan = author_series_plan();

    for size in [100, 1000, 5000] {
        let cat = synthetic_catalog(size);
        let flat = execute(&plan, &cat).unwrap();
        group.bench_with_input(BenchmarkId::new("group_break", size), &flat, |b, flat| {
            b.iter(|| materialize(black_box(&plan), flat.clone()).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_flat_select, bench_materialize);
criterion_main!(benches);
