//! The node state store.

use crate::snapshot::ExpansionSnapshot;
use alloc::vec::Vec;
use hashbrown::HashMap;
use shelfview_core::{Error, Result, RowId};
use shelfview_list::ListTable;
use shelfview_query::GroupKind;

/// Expansion/visibility state of one materialized row.
#[derive(Clone, Debug)]
pub struct NodeState {
    pub row_id: RowId,
    pub level: u32,
    pub kind: GroupKind,
    /// User-controlled flag; meaningful on header rows.
    pub expanded: bool,
    /// Derived: true exactly when every strict ancestor is expanded.
    pub visible: bool,
}

/// How the store is seeded after a list build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebuildPolicy {
    /// Every header expanded; the whole tree visible.
    AlwaysExpanded,
    /// Every node collapsed; only level-1 rows (no ancestors) visible.
    AlwaysCollapsed,
    /// Replay a persisted snapshot matched by (level, node_key); unmatched
    /// nodes fall back to the style's per-level default.
    PreserveSaved,
    /// Per-level default-expanded flags from the grouping schema.
    PreferredPerStyle,
}

/// One entry per materialized row, indexed by row id. The sole mutable
/// authority for expansion and visibility for the life of a session.
pub struct NodeStateStore {
    nodes: Vec<NodeState>,
}

impl NodeStateStore {
    /// Builds the store from a freshly materialized list.
    ///
    /// `defaults` holds the per-group-level default-expanded flags
    /// (index = level - 1); book-level nodes default collapsed.
    pub fn build(
        table: &ListTable,
        policy: RebuildPolicy,
        defaults: &[bool],
        snapshot: Option<&ExpansionSnapshot>,
    ) -> Self {
        // Transient lookup for PreserveSaved.
        let saved: HashMap<(u32, &str), bool> = match (policy, snapshot) {
            (RebuildPolicy::PreserveSaved, Some(snap)) => snap
                .entries()
                .iter()
                .map(|e| ((e.level, e.node_key.as_str()), e.expanded))
                .collect(),
            _ => HashMap::new(),
        };

        let default_for = |level: u32| -> bool {
            defaults.get((level - 1) as usize).copied().unwrap_or(false)
        };

        let mut nodes = Vec::with_capacity(table.len());
        // Ancestor stack: (level, expanded) of the enclosing headers.
        let mut stack: Vec<(u32, bool)> = Vec::new();
        for row in table.rows() {
            while stack.last().is_some_and(|&(l, _)| l >= row.level) {
                stack.pop();
            }

            let expanded = if row.is_book() {
                false
            } else {
                match policy {
                    RebuildPolicy::AlwaysExpanded => true,
                    RebuildPolicy::AlwaysCollapsed => false,
                    RebuildPolicy::PreferredPerStyle => default_for(row.level),
                    RebuildPolicy::PreserveSaved => saved
                        .get(&(row.level, row.node_key.as_str()))
                        .copied()
                        .unwrap_or_else(|| default_for(row.level)),
                }
            };

            let visible = stack.iter().all(|&(_, e)| e);
            nodes.push(NodeState {
                row_id: row.id,
                level: row.level,
                kind: row.kind,
                expanded,
                visible,
            });
            stack.push((row.level, expanded));
        }

        log::debug!(
            "node state built for {} rows ({:?})",
            nodes.len(),
            policy
        );
        Self { nodes }
    }

    /// Number of nodes (equals the materialized row count).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node states in display order.
    #[inline]
    pub fn nodes(&self) -> &[NodeState] {
        &self.nodes
    }

    /// Looks up a node by row id.
    pub fn get(&self, row_id: RowId) -> Result<&NodeState> {
        if row_id == 0 {
            return Err(Error::node_not_found(row_id));
        }
        self.nodes
            .get((row_id - 1) as usize)
            .ok_or(Error::NodeNotFound { row_id })
    }

    fn index_of(&self, row_id: RowId) -> Result<usize> {
        self.get(row_id).map(|n| (n.row_id - 1) as usize)
    }

    /// Sets a node's expansion and propagates visibility through its
    /// subtree, bounded by `relative_child_levels`.
    ///
    /// Collapsing hides every descendant but leaves their expansion flags
    /// alone, so re-expanding restores the prior nested state. Expanding
    /// reveals descendants down to `level + relative_child_levels`:
    /// headers strictly above that depth are force-expanded, nodes at the
    /// boundary keep their own remembered flag.
    pub fn set_node(&mut self, row_id: RowId, expand: bool, relative_child_levels: u32) -> Result<()> {
        let idx = self.index_of(row_id)?;
        let node_level = self.nodes[idx].level;
        self.nodes[idx].expanded = expand;

        if expand && relative_child_levels > 1 {
            let reveal_limit = node_level.saturating_add(relative_child_levels);
            let mut j = idx + 1;
            while j < self.nodes.len() && self.nodes[j].level > node_level {
                let n = &mut self.nodes[j];
                if n.kind != GroupKind::Book && n.level < reveal_limit {
                    n.expanded = true;
                }
                j += 1;
            }
        }

        self.recompute_subtree(idx);
        Ok(())
    }

    /// Bulk expansion for "expand all / collapse all".
    ///
    /// Expanding opens every node. Collapsing closes every node at
    /// `top_level` and below while keeping rows at levels up to
    /// `top_level` visible (their enclosing headers stay expanded).
    pub fn set_all_nodes(&mut self, top_level: u32, expand: bool) {
        for node in &mut self.nodes {
            if node.kind == GroupKind::Book {
                continue;
            }
            if expand {
                node.expanded = true;
            } else {
                node.expanded = node.level < top_level;
            }
        }
        self.recompute_all();
    }

    /// Expands the ancestor chain of one row, one level increment each,
    /// so the path from the root to that row becomes visible without
    /// disturbing sibling subtrees. Idempotent.
    pub fn ensure_visible(&mut self, table: &ListTable, row_id: RowId) -> Result<()> {
        let row = table.get(row_id)?;
        for level in 1..row.level {
            // The ancestor shares the row's node-key prefix at its level.
            if let Some(ancestor_id) = table.ancestor_at(row, level) {
                self.set_node(ancestor_id, true, 1)?;
            }
        }
        Ok(())
    }

    /// Number of currently visible rows. Recomputed on demand; the display
    /// order is the row-id order, so callers page with `windowed_rows`.
    pub fn visible_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.visible).count()
    }

    /// Recomputes visibility for the subtree rooted at `idx` from the
    /// expansion flags, anchored on the root's own (unchanged) visibility.
    fn recompute_subtree(&mut self, idx: usize) {
        let base_visible = self.nodes[idx].visible;
        let node_level = self.nodes[idx].level;
        let mut stack: Vec<(u32, bool)> = Vec::new();
        stack.push((node_level, self.nodes[idx].expanded));

        let mut j = idx + 1;
        while j < self.nodes.len() && self.nodes[j].level > node_level {
            let level = self.nodes[j].level;
            while stack.last().is_some_and(|&(l, _)| l >= level) {
                stack.pop();
            }
            self.nodes[j].visible = base_visible && stack.iter().all(|&(_, e)| e);
            stack.push((level, self.nodes[j].expanded));
            j += 1;
        }
    }

    /// Recomputes visibility for every row.
    fn recompute_all(&mut self) {
        let mut stack: Vec<(u32, bool)> = Vec::new();
        for node in &mut self.nodes {
            while stack.last().is_some_and(|&(l, _)| l >= node.level) {
                stack.pop();
            }
            node.visible = stack.iter().all(|&(_, e)| e);
            stack.push((node.level, node.expanded));
        }
    }
}
