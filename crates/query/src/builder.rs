//! List query builder.
//!
//! `ListQueryBuilder` turns a style, an optional bookshelf restriction and
//! a set of extra filters into an immutable `ListPlan`: the de-duplicated
//! domain list, the per-level grouping layout, the resolved sort chain and
//! the join-expansion flags. The plan is plain data; the executor and the
//! materializer both read it, and tests assert on its structure directly.

use crate::domain::{BookField, Domain, DomainExpr, SortKey, SortOrder};
use crate::filter::Filter;
use crate::group::{GroupKind, Style};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use shelfview_catalog::BookshelfId;
use shelfview_core::{DataType, Error, Result};

/// Name of the fixed book-id domain (index 0 of every plan).
pub const BOOK_ID_DOMAIN: &str = "book_id";
/// Name of the fixed title domain (index 1 of every plan).
pub const TITLE_DOMAIN: &str = "title";

/// One grouping level of the plan, with its domains resolved to indexes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelPlan {
    pub kind: GroupKind,
    /// 1-based level, outermost first.
    pub level: u32,
    /// Index of the display domain.
    pub display: usize,
    /// Index of the node-key domain.
    pub key: usize,
    /// Indexes of the accumulated domains inherited by descendant rows.
    pub accumulated: Vec<usize>,
    /// Per-level default used by the PreferredPerStyle rebuild policy.
    pub default_expanded: bool,
}

/// Join-expansion flags derived from the style and the active filters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinSpec {
    pub each_author: bool,
    pub each_series: bool,
    pub each_publisher: bool,
    /// Expand one context row per bookshelf membership. Set when the
    /// style groups by Bookshelf or a bookshelf filter is active.
    pub by_shelf: bool,
}

/// An immutable list-build plan.
#[derive(Clone, Debug)]
pub struct ListPlan {
    pub style_name: String,
    pub domains: Vec<Domain>,
    pub levels: Vec<LevelPlan>,
    pub sort: Vec<SortKey>,
    pub filters: Vec<Filter>,
    pub joins: JoinSpec,
}

impl ListPlan {
    /// Finds a domain index by name.
    pub fn domain_index(&self, name: &str) -> Option<usize> {
        self.domains.iter().position(|d| d.name == name)
    }

    /// The level book rows sit at: one below the innermost group.
    pub fn book_level(&self) -> u32 {
        self.levels.len() as u32 + 1
    }
}

/// Builder for `ListPlan`.
pub struct ListQueryBuilder<'a> {
    style: &'a Style,
    bookshelf: Option<BookshelfId>,
    filters: Vec<Filter>,
    extra_domains: Vec<Domain>,
}

impl<'a> ListQueryBuilder<'a> {
    /// Creates a builder for the given style.
    pub fn new(style: &'a Style) -> Self {
        Self {
            style,
            bookshelf: None,
            filters: Vec::new(),
            extra_domains: Vec::new(),
        }
    }

    /// Restricts the list to one bookshelf.
    pub fn bookshelf(mut self, shelf: BookshelfId) -> Self {
        self.bookshelf = Some(shelf);
        self
    }

    /// Adds a filter. Inactive (blank) filters are dropped at build time.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Requests an extra domain to be carried on every row (e.g. a field
    /// the UI renders on book rows, or one the updater needs to patch).
    pub fn extra_domain(mut self, domain: Domain) -> Self {
        self.extra_domains.push(domain);
        self
    }

    /// Builds the plan.
    pub fn build(self) -> Result<ListPlan> {
        let mut domains: Vec<Domain> = Vec::new();
        add_domain(
            &mut domains,
            Domain::new(BOOK_ID_DOMAIN, DomainExpr::Book(BookField::Id)),
        )?;
        add_domain(
            &mut domains,
            Domain::new(TITLE_DOMAIN, DomainExpr::Book(BookField::Title)),
        )?;

        // Group levels, outermost first.
        let mut levels = Vec::with_capacity(self.style.group_count());
        let mut sort: Vec<SortKey> = Vec::new();
        for (i, group) in self.style.groups().iter().enumerate() {
            let display = add_domain(&mut domains, group.display().clone())?;
            let key = add_domain(
                &mut domains,
                Domain::new(format!("{}_key", group.kind().tag()), group.key().clone()),
            )?;
            let mut accumulated = Vec::with_capacity(group.accumulated().len());
            for domain in group.accumulated() {
                accumulated.push(add_domain(&mut domains, domain.clone())?);
            }
            for sort_domain in group.sort() {
                let idx = add_domain(&mut domains, sort_domain.domain.clone())?;
                sort.push(SortKey {
                    domain: idx,
                    order: sort_domain.order,
                    collated: sort_domain.domain.data_type == DataType::String
                        && !sort_domain.pre_collated,
                });
            }
            // The key domain tie-breaks equal display values so rows of two
            // same-named groups never interleave under one header.
            sort.push(SortKey {
                domain: key,
                order: SortOrder::Asc,
                collated: false,
            });
            levels.push(LevelPlan {
                kind: group.kind(),
                level: i as u32 + 1,
                display,
                key,
                accumulated,
                default_expanded: group.default_expanded(),
            });
        }

        // Caller domains.
        for domain in self.extra_domains {
            add_domain(&mut domains, domain)?;
        }

        // Books inside a series order by their series number first.
        if let Some(series) = levels.iter().find(|l| l.kind == GroupKind::Series) {
            if let Some(&number_idx) = series.accumulated.first() {
                sort.push(SortKey {
                    domain: number_idx,
                    order: SortOrder::Asc,
                    collated: true,
                });
            }
        }

        // Book-level sort: title under collation, then book id so equal
        // titles keep a stable order across rebuilds.
        let title_idx = 1;
        sort.push(SortKey {
            domain: title_idx,
            order: SortOrder::Asc,
            collated: true,
        });
        sort.push(SortKey {
            domain: 0,
            order: SortOrder::Asc,
            collated: false,
        });

        // Active filters only; blanks are silently dropped.
        let mut filters: Vec<Filter> = self
            .filters
            .into_iter()
            .filter(Filter::is_active)
            .collect();
        if let Some(shelf) = self.bookshelf {
            filters.push(Filter::OnBookshelf(shelf));
        }

        let by_shelf = self.style.groups_by(GroupKind::Bookshelf)
            || filters.iter().any(|f| matches!(f, Filter::OnBookshelf(_)));
        let joins = JoinSpec {
            each_author: self.style.books_under_each_author(),
            each_series: self.style.books_under_each_series(),
            each_publisher: self.style.books_under_each_publisher(),
            by_shelf,
        };

        log::debug!(
            "list plan for style '{}': {} domains, {} levels, {} filters",
            self.style.name(),
            domains.len(),
            levels.len(),
            filters.len()
        );

        Ok(ListPlan {
            style_name: self.style.name().to_string(),
            domains,
            levels,
            sort,
            filters,
            joins,
        })
    }
}

/// Adds a domain, de-duplicating by name. The same name with an identical
/// expression folds into one column; the same name with a different
/// expression is a caller error.
fn add_domain(domains: &mut Vec<Domain>, domain: Domain) -> Result<usize> {
    if let Some(idx) = domains.iter().position(|d| d.name == domain.name) {
        if domains[idx].expr == domain.expr {
            return Ok(idx);
        }
        return Err(Error::duplicate_domain(domain.name));
    }
    domains.push(domain);
    Ok(domains.len() - 1)
}
