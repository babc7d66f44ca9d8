//! The list session.

use alloc::string::String;
use alloc::vec::Vec;
use shelfview_catalog::{BookId, BookshelfId, Catalog};
use shelfview_core::{Error, Result, RowId, Value};
use shelfview_list::{materialize, update_column, ListTable, MaterializedRow};
use shelfview_query::{execute, Domain, Filter, GroupKind, ListPlan, ListQueryBuilder, Style};
use shelfview_state::{ExpansionSnapshot, NodeStateStore, PositionedNode, RebuildPolicy};

/// An owned snapshot of one visible row, ready for the UI adapter.
#[derive(Clone, Debug)]
pub struct ListRowView {
    pub row_id: RowId,
    pub level: u32,
    pub kind: GroupKind,
    pub node_key: String,
    pub book_id: Option<BookId>,
    pub values: Vec<Value>,
    pub expanded: bool,
    /// Position among the currently visible rows.
    pub list_position: usize,
}

/// One built booklist: the exclusive owner of a materialized list and its
/// node state. Dropping or closing the session drops the backing tables.
pub struct ListSession {
    plan: ListPlan,
    table: Option<ListTable>,
    store: Option<NodeStateStore>,
}

impl ListSession {
    /// Builds a list session: plan, flat select, materialization, node
    /// state. All-or-nothing; on error nothing is retained.
    ///
    /// The initial visible count is computed here rather than on first
    /// read, so the first page fetch stays cheap.
    pub fn build(
        style: &Style,
        catalog: &dyn Catalog,
        bookshelf: Option<BookshelfId>,
        filters: Vec<Filter>,
        policy: RebuildPolicy,
        snapshot: Option<&ExpansionSnapshot>,
    ) -> Result<Self> {
        Self::build_with(style, catalog, bookshelf, filters, Vec::new(), policy, snapshot)
    }

    /// Like `build`, additionally carrying caller-requested extra domains
    /// on every row (fields the UI renders on book rows, or fields the
    /// incremental updater needs to patch).
    pub fn build_with(
        style: &Style,
        catalog: &dyn Catalog,
        bookshelf: Option<BookshelfId>,
        filters: Vec<Filter>,
        extra_domains: Vec<Domain>,
        policy: RebuildPolicy,
        snapshot: Option<&ExpansionSnapshot>,
    ) -> Result<Self> {
        let mut builder = ListQueryBuilder::new(style);
        if let Some(shelf) = bookshelf {
            builder = builder.bookshelf(shelf);
        }
        for filter in filters {
            builder = builder.filter(filter);
        }
        for domain in extra_domains {
            builder = builder.extra_domain(domain);
        }
        let plan = builder.build()?;

        let flat = execute(&plan, catalog)?;
        let table = materialize(&plan, flat)?;
        let defaults: Vec<bool> = plan.levels.iter().map(|l| l.default_expanded).collect();
        let store = NodeStateStore::build(&table, policy, &defaults, snapshot);

        log::debug!(
            "session built: {} rows, {} visible, {} books",
            table.len(),
            store.visible_count(),
            table.book_count()
        );

        Ok(Self {
            plan,
            table: Some(table),
            store: Some(store),
        })
    }

    /// The plan this session was built from.
    #[inline]
    pub fn plan(&self) -> &ListPlan {
        &self.plan
    }

    /// Returns true once the session has been closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.table.is_none()
    }

    /// Drops the backing tables. Idempotent; every other operation on a
    /// closed session fails with `SessionClosed`.
    pub fn close(&mut self) {
        if self.table.take().is_some() {
            self.store = None;
            log::debug!("session closed for style '{}'", self.plan.style_name);
        }
    }

    /// The visible window `[offset, offset + limit)` as owned row views.
    pub fn windowed_rows(&self, offset: usize, limit: usize) -> Result<Vec<ListRowView>> {
        let (table, store) = self.parts()?;
        let ids = store.windowed_rows(offset, limit);
        let mut out = Vec::with_capacity(ids.len());
        for (i, row_id) in ids.into_iter().enumerate() {
            let row = table.get(row_id)?;
            let state = store.get(row_id)?;
            out.push(Self::row_view(row, state.expanded, offset + i));
        }
        Ok(out)
    }

    /// Flips a node's expansion, revealing or hiding descendants down to
    /// `relative_child_levels` below it. Returns the refreshed node.
    pub fn toggle_node(&mut self, row_id: RowId, relative_child_levels: u32) -> Result<PositionedNode> {
        let (_, store) = self.parts_mut()?;
        let expanded = store.get(row_id)?.expanded;
        store.set_node(row_id, !expanded, relative_child_levels)?;
        store.node(row_id)
    }

    /// Expand or collapse the whole tree. Rows at levels up to
    /// `top_level` stay visible on collapse.
    pub fn expand_all(&mut self, top_level: u32, expand: bool) -> Result<()> {
        let (_, store) = self.parts_mut()?;
        store.set_all_nodes(top_level, expand);
        Ok(())
    }

    /// Makes the path to one row visible and returns the refreshed node.
    pub fn ensure_visible(&mut self, row_id: RowId) -> Result<PositionedNode> {
        let (table, store) = self.parts_mut()?;
        store.ensure_visible(table, row_id)?;
        store.node(row_id)
    }

    /// Every shelf position of a book in this list. Unknown books yield
    /// an empty list.
    pub fn nodes_for_book(&self, book_id: BookId) -> Result<Vec<PositionedNode>> {
        let (table, store) = self.parts()?;
        store.nodes_for_book(table, book_id)
    }

    /// Patches one book column in place, without rebuilding and without
    /// touching expansion state. A field the current build does not carry
    /// is a no-op returning no nodes.
    pub fn update_book_field(
        &mut self,
        book_id: BookId,
        field: &str,
        value: Value,
    ) -> Result<Vec<PositionedNode>> {
        let table = self.table.as_mut().ok_or(Error::SessionClosed)?;
        let affected = update_column(table, book_id, field, value);
        let store = self.store.as_ref().ok_or(Error::SessionClosed)?;
        let mut out = Vec::with_capacity(affected.len());
        for row_id in affected {
            out.push(store.node(row_id)?);
        }
        Ok(out)
    }

    /// Finds the next book row after `after_row_id` matching the
    /// predicate, making it visible. Returns None when exhausted.
    pub fn next_book_matching<F>(
        &mut self,
        after_row_id: RowId,
        predicate: F,
    ) -> Result<Option<PositionedNode>>
    where
        F: Fn(&MaterializedRow) -> bool,
    {
        let (table, store) = self.parts_mut()?;
        store.find_next_matching(table, after_row_id, predicate)
    }

    /// Captures the expansion snapshot for persistence, so a later build
    /// with `RebuildPolicy::PreserveSaved` can restore it.
    pub fn save_expansion(&self) -> Result<ExpansionSnapshot> {
        let (table, store) = self.parts()?;
        Ok(ExpansionSnapshot::capture(table, store))
    }

    /// Number of currently visible rows.
    pub fn visible_count(&self) -> Result<usize> {
        Ok(self.parts()?.1.visible_count())
    }

    /// Total book rows in the list.
    pub fn book_count(&self) -> Result<usize> {
        Ok(self.parts()?.0.book_count())
    }

    /// Distinct books in the list.
    pub fn distinct_book_count(&self) -> Result<usize> {
        Ok(self.parts()?.0.distinct_book_count())
    }

    fn parts(&self) -> Result<(&ListTable, &NodeStateStore)> {
        match (self.table.as_ref(), self.store.as_ref()) {
            (Some(table), Some(store)) => Ok((table, store)),
            _ => Err(Error::SessionClosed),
        }
    }

    fn parts_mut(&mut self) -> Result<(&ListTable, &mut NodeStateStore)> {
        match (self.table.as_ref(), self.store.as_mut()) {
            (Some(table), Some(store)) => Ok((table, store)),
            _ => Err(Error::SessionClosed),
        }
    }

    fn row_view(row: &MaterializedRow, expanded: bool, list_position: usize) -> ListRowView {
        ListRowView {
            row_id: row.id,
            level: row.level,
            kind: row.kind,
            node_key: row.node_key.clone(),
            book_id: row.book_id,
            values: row.values.clone(),
            expanded,
            list_position,
        }
    }
}
