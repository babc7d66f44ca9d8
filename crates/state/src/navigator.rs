//! Navigator reads over the node state store and the materialized list.

use crate::store::{NodeState, NodeStateStore};
use alloc::vec::Vec;
use shelfview_catalog::BookId;
use shelfview_core::{Result, RowId};
use shelfview_list::{ListTable, MaterializedRow};
use shelfview_query::GroupKind;

/// A node with its position among the currently visible rows.
///
/// `list_position` is recomputed at lookup time ("visible rows before
/// mine"), never cached across mutations; None when the node itself is
/// hidden.
#[derive(Clone, Debug)]
pub struct PositionedNode {
    pub row_id: RowId,
    pub level: u32,
    pub kind: GroupKind,
    pub expanded: bool,
    pub visible: bool,
    pub list_position: Option<usize>,
}

impl NodeStateStore {
    /// Row ids of the visible window `[offset, offset + limit)`, in
    /// display order. Visibility is read at call time; callers re-invoke
    /// after expansion changes rather than holding a live cursor.
    pub fn windowed_rows(&self, offset: usize, limit: usize) -> Vec<RowId> {
        self.nodes()
            .iter()
            .filter(|n| n.visible)
            .skip(offset)
            .take(limit)
            .map(|n| n.row_id)
            .collect()
    }

    /// Looks up a node and computes its current list position.
    pub fn node(&self, row_id: RowId) -> Result<PositionedNode> {
        let state = self.get(row_id)?;
        Ok(self.positioned(state))
    }

    /// Every book-level node referencing the given book, in display order.
    /// Unknown books yield an empty list.
    pub fn nodes_for_book(&self, table: &ListTable, book_id: BookId) -> Result<Vec<PositionedNode>> {
        let mut out = Vec::new();
        for &row_id in table.rows_for_book(book_id) {
            out.push(self.node(row_id)?);
        }
        Ok(out)
    }

    /// Scans book rows forward from `after_row_id` (exclusive; 0 scans
    /// from the start), returning the first one matching the predicate.
    /// The match is made visible before it is returned.
    pub fn find_next_matching<F>(
        &mut self,
        table: &ListTable,
        after_row_id: RowId,
        predicate: F,
    ) -> Result<Option<PositionedNode>>
    where
        F: Fn(&MaterializedRow) -> bool,
    {
        let start = after_row_id as usize; // rows are 1-based, so this skips `after_row_id`
        for row in table.rows().iter().skip(start) {
            if !row.is_book() || !predicate(row) {
                continue;
            }
            self.ensure_visible(table, row.id)?;
            return self.node(row.id).map(Some);
        }
        Ok(None)
    }

    fn positioned(&self, state: &NodeState) -> PositionedNode {
        let list_position = if state.visible {
            // Visible rows strictly before this one.
            let pos = self
                .nodes()
                .iter()
                .take((state.row_id - 1) as usize)
                .filter(|n| n.visible)
                .count();
            Some(pos)
        } else {
            None
        };
        PositionedNode {
            row_id: state.row_id,
            level: state.level,
            kind: state.kind,
            expanded: state.expanded,
            visible: state.visible,
            list_position,
        }
    }
}
