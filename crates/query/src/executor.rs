//! Plan executor: join expansion, filtering and sorting.
//!
//! Produces the "one row per book (per join combination)" flat select the
//! materializer consumes. Expansion starts from the book table and widens
//! per the plan's join spec; every produced row carries the plan's full
//! domain list so headers can later be synthesized from any row.

use crate::builder::ListPlan;
use crate::context::BookContext;
use crate::domain::SortOrder;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use shelfview_catalog::{AuthorLink, BookId, Catalog, AUTHOR_TYPE_WRITER};
use shelfview_core::collation::compare_values;
use shelfview_core::{Result, Value};

/// One flat book-level row: the plan's domains evaluated for one join
/// combination. A book appears once per combination the join spec yields.
#[derive(Clone, Debug)]
pub struct FlatRow {
    pub book_id: BookId,
    pub values: Vec<Value>,
}

/// Picks the primary author link: the first link, in position order, that
/// is writer-typed or sits at position 1.
fn primary_author(links: &[AuthorLink]) -> Option<&AuthorLink> {
    links
        .iter()
        .find(|l| l.author_type & AUTHOR_TYPE_WRITER != 0 || l.position == 1)
}

/// Executes the plan against the catalog: expand joins, apply filters,
/// evaluate domains, sort. The returned rows are in final list order.
pub fn execute(plan: &ListPlan, catalog: &dyn Catalog) -> Result<Vec<FlatRow>> {
    let mut rows: Vec<FlatRow> = Vec::new();

    for book in catalog.books() {
        let author_links = catalog.author_links(book.id);
        let author_choices: Vec<Option<&AuthorLink>> = if plan.joins.each_author {
            if author_links.is_empty() {
                vec![None]
            } else {
                author_links.iter().map(Some).collect()
            }
        } else {
            vec![primary_author(author_links)]
        };

        let series_links = catalog.series_links(book.id);
        let series_choices: Vec<Option<&shelfview_catalog::SeriesLink>> = if plan.joins.each_series
        {
            if series_links.is_empty() {
                vec![None]
            } else {
                series_links.iter().map(Some).collect()
            }
        } else {
            vec![series_links.first()]
        };

        let publisher_links = catalog.publisher_links(book.id);
        let publisher_choices: Vec<Option<&shelfview_catalog::PublisherLink>> =
            if plan.joins.each_publisher {
                if publisher_links.is_empty() {
                    vec![None]
                } else {
                    publisher_links.iter().map(Some).collect()
                }
            } else {
                vec![publisher_links.first()]
            };

        let shelf_links = catalog.shelf_links(book.id);
        let shelf_choices: Vec<Option<&shelfview_catalog::ShelfLink>> = if plan.joins.by_shelf {
            if shelf_links.is_empty() {
                vec![None]
            } else {
                shelf_links.iter().map(Some).collect()
            }
        } else {
            vec![None]
        };

        for author_link in &author_choices {
            for series_link in &series_choices {
                for publisher_link in &publisher_choices {
                    for shelf_link in &shelf_choices {
                        let ctx = BookContext {
                            book,
                            author: author_link.and_then(|l| catalog.author(l.author_id)),
                            author_link: *author_link,
                            series: series_link.and_then(|l| catalog.series(l.series_id)),
                            series_link: *series_link,
                            publisher: publisher_link
                                .and_then(|l| catalog.publisher(l.publisher_id)),
                            shelf: shelf_link.and_then(|l| catalog.bookshelf(l.bookshelf_id)),
                            shelf_links,
                        };

                        if !plan.filters.iter().all(|f| f.matches(&ctx)) {
                            continue;
                        }

                        let values: Vec<Value> =
                            plan.domains.iter().map(|d| d.expr.eval(&ctx)).collect();
                        rows.push(FlatRow {
                            book_id: book.id,
                            values,
                        });
                    }
                }
            }
        }
    }

    sort_rows(plan, &mut rows);
    log::debug!(
        "flat select for style '{}' produced {} rows",
        plan.style_name,
        rows.len()
    );
    Ok(rows)
}

/// Sorts rows by the plan's resolved sort chain. `sort_by` is stable, so
/// rows comparing equal keep catalog order.
fn sort_rows(plan: &ListPlan, rows: &mut [FlatRow]) {
    rows.sort_by(|a, b| {
        for key in &plan.sort {
            let mut ord = compare_values(&a.values[key.domain], &b.values[key.domain], key.collated);
            if key.order == SortOrder::Desc {
                ord = ord.reverse();
            }
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}
