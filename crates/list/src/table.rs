//! The materialized list table.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use shelfview_catalog::BookId;
use shelfview_core::{Error, Result, RowId, Value};
use shelfview_query::key::level_prefix;
use shelfview_query::{Domain, GroupKind};

/// One row of the materialized list: a synthetic group header or a book.
///
/// Rows are stored in emission order; `id` is 1-based and equals the row's
/// position in that order, so ordering by id reproduces the display order.
/// `node_key` of a header is a strict prefix of the node keys of every row
/// beneath it.
#[derive(Clone, Debug)]
pub struct MaterializedRow {
    pub id: RowId,
    /// 1 = outermost group; `book_level` = book rows.
    pub level: u32,
    pub kind: GroupKind,
    pub node_key: String,
    /// Set on book rows only.
    pub book_id: Option<BookId>,
    /// Aligned with the owning table's domain list.
    pub values: Vec<Value>,
}

impl MaterializedRow {
    /// Returns true if this is a book row rather than a group header.
    #[inline]
    pub fn is_book(&self) -> bool {
        self.kind == GroupKind::Book
    }
}

/// The flattened tree produced by one materialization.
pub struct ListTable {
    domains: Vec<Domain>,
    rows: Vec<MaterializedRow>,
    book_level: u32,
    /// Book id -> ids of its book rows, for nodes-for-book lookups and
    /// incremental updates.
    book_index: HashMap<BookId, Vec<RowId>>,
    /// Header node_key -> header row id. One entry per header (header
    /// uniqueness: one header per (level, ancestor path)).
    key_index: BTreeMap<String, RowId>,
    book_count: usize,
    distinct_book_count: usize,
}

impl ListTable {
    pub(crate) fn new(
        domains: Vec<Domain>,
        rows: Vec<MaterializedRow>,
        book_level: u32,
        book_index: HashMap<BookId, Vec<RowId>>,
        key_index: BTreeMap<String, RowId>,
        book_count: usize,
        distinct_book_count: usize,
    ) -> Self {
        Self {
            domains,
            rows,
            book_level,
            book_index,
            key_index,
            book_count,
            distinct_book_count,
        }
    }

    /// All rows, in display order.
    #[inline]
    pub fn rows(&self) -> &[MaterializedRow] {
        &self.rows
    }

    /// Number of rows (headers + books).
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The domain schema this table was built with.
    #[inline]
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Finds a domain index by name.
    pub fn domain_index(&self, name: &str) -> Option<usize> {
        self.domains.iter().position(|d| d.name == name)
    }

    /// The level book rows sit at.
    #[inline]
    pub fn book_level(&self) -> u32 {
        self.book_level
    }

    /// Total book rows (a book counts once per appearance).
    #[inline]
    pub fn book_count(&self) -> usize {
        self.book_count
    }

    /// Distinct books across all book rows.
    #[inline]
    pub fn distinct_book_count(&self) -> usize {
        self.distinct_book_count
    }

    /// Looks up a row by id.
    pub fn get(&self, row_id: RowId) -> Result<&MaterializedRow> {
        if row_id == 0 {
            return Err(Error::node_not_found(row_id));
        }
        self.rows
            .get((row_id - 1) as usize)
            .ok_or(Error::NodeNotFound { row_id })
    }

    /// Ids of the book rows referencing a book, in display order.
    pub fn rows_for_book(&self, book_id: BookId) -> &[RowId] {
        self.book_index
            .get(&book_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Looks up the header row with exactly this node key.
    pub fn header_at(&self, node_key: &str) -> Option<RowId> {
        self.key_index.get(node_key).copied()
    }

    /// The ancestor header of a row at the given level, resolved through
    /// the node-key prefix.
    pub fn ancestor_at(&self, row: &MaterializedRow, level: u32) -> Option<RowId> {
        let prefix = level_prefix(&row.node_key, level)?;
        self.header_at(prefix)
    }

    /// Ids of every row sitting under the given node key (the header
    /// itself excluded): the whole subtree of one group.
    pub fn rows_under(&self, node_key: &str) -> Vec<RowId> {
        let Some(header_id) = self.header_at(node_key) else {
            return Vec::new();
        };
        let start = header_id as usize; // rows are 1-based
        let header_level = self.rows[start - 1].level;
        self.rows[start..]
            .iter()
            .take_while(|r| r.level > header_level)
            .map(|r| r.id)
            .collect()
    }

    pub(crate) fn set_value(&mut self, row_id: RowId, domain: usize, value: Value) {
        if let Some(row) = self.rows.get_mut((row_id - 1) as usize) {
            if let Some(cell) = row.values.get_mut(domain) {
                *cell = value;
            }
        }
    }
}
