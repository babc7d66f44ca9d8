//! Incremental row updates.
//!
//! Narrow in-place updates for book columns that do not participate in
//! grouping or sorting (read status, loanee, rating shown on book rows).
//! A column absent from the current build is a no-op, not an error: a
//! list grouped without that domain simply does not carry it.

use crate::table::ListTable;
use alloc::vec::Vec;
use shelfview_catalog::BookId;
use shelfview_core::{RowId, Value};

/// Updates one column on every book row referencing `book_id`.
///
/// Returns the affected row ids (empty when the column is absent from the
/// build or the book has no rows) so the caller can refresh just those
/// positions instead of rebuilding. Expansion state is never touched.
pub fn update_column(
    table: &mut ListTable,
    book_id: BookId,
    domain: &str,
    value: Value,
) -> Vec<RowId> {
    let Some(domain_idx) = table.domain_index(domain) else {
        return Vec::new();
    };
    let row_ids: Vec<RowId> = table.rows_for_book(book_id).to_vec();
    for &row_id in &row_ids {
        table.set_value(row_id, domain_idx, value.clone());
    }
    if !row_ids.is_empty() {
        log::trace!(
            "updated {} on {} rows of book {}",
            domain,
            row_ids.len(),
            book_id
        );
    }
    row_ids
}
