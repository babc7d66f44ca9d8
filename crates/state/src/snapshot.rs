//! Persistable expansion snapshots.

use crate::store::NodeStateStore;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use shelfview_list::ListTable;

/// One persisted header state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub level: u32,
    pub node_key: String,
    pub expanded: bool,
}

/// A serializable snapshot of header expansion, keyed by
/// (level, node_key). The embedder persists one per style/shelf so the
/// PreserveSaved rebuild policy can restore it on the next build; nodes
/// that no longer exist are simply not matched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl ExpansionSnapshot {
    /// Captures the current expansion of every header row.
    pub fn capture(table: &ListTable, store: &NodeStateStore) -> Self {
        let entries = table
            .rows()
            .iter()
            .filter(|r| !r.is_book())
            .filter_map(|r| {
                store.get(r.id).ok().map(|n| SnapshotEntry {
                    level: r.level,
                    node_key: r.node_key.clone(),
                    expanded: n.expanded,
                })
            })
            .collect();
        Self { entries }
    }

    /// The captured entries.
    #[inline]
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    /// Returns true if nothing was captured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
