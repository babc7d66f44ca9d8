//! Grouping schema: group kinds, descriptors and styles.
//!
//! A `Style` is the user's saved grouping configuration: an ordered list of
//! `GroupDescriptor`s (outermost first) plus the "show books under each
//! author/series/publisher" flags. Styles are immutable once built; one
//! list build holds one style.

use crate::domain::{
    AuthorField, BookField, Domain, DomainExpr, PublisherField, SeriesField, ShelfField, SortOrder,
};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use shelfview_core::{Error, Result};

/// The kind of one grouping level. `Book` is the implicit terminal level
/// of every list and is rejected as an explicit group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Author,
    Series,
    Publisher,
    Bookshelf,
    ReadStatus,
    Rating,
    Language,
    PublicationYear,
    TitleLetter,
    Loaned,
    /// Terminal book level; never an explicit group.
    Book,
}

impl GroupKind {
    /// Stable numeric identifier, for embedders that persist styles.
    pub fn id(self) -> u8 {
        match self {
            GroupKind::Author => 1,
            GroupKind::Series => 2,
            GroupKind::Publisher => 3,
            GroupKind::Bookshelf => 4,
            GroupKind::ReadStatus => 5,
            GroupKind::Rating => 6,
            GroupKind::Language => 7,
            GroupKind::PublicationYear => 8,
            GroupKind::TitleLetter => 9,
            GroupKind::Loaned => 10,
            GroupKind::Book => 0,
        }
    }

    /// Node-key fragment tag.
    pub fn tag(self) -> &'static str {
        match self {
            GroupKind::Author => "a",
            GroupKind::Series => "s",
            GroupKind::Publisher => "p",
            GroupKind::Bookshelf => "bs",
            GroupKind::ReadStatus => "rd",
            GroupKind::Rating => "rt",
            GroupKind::Language => "ln",
            GroupKind::PublicationYear => "y",
            GroupKind::TitleLetter => "tl",
            GroupKind::Loaned => "lo",
            GroupKind::Book => "b",
        }
    }
}

/// One sort contribution of a group.
#[derive(Clone, Debug, PartialEq)]
pub struct SortDomain {
    pub domain: Domain,
    pub order: SortOrder,
    /// The domain's text is already in canonical case; skip collation.
    pub pre_collated: bool,
}

/// One level of the grouping schema.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupDescriptor {
    kind: GroupKind,
    display: Domain,
    key: DomainExpr,
    accumulated: Vec<Domain>,
    sort: Vec<SortDomain>,
    default_expanded: bool,
}

impl GroupDescriptor {
    /// Creates the descriptor for a group kind. Grouping by the terminal
    /// Book kind is rejected.
    pub fn for_kind(kind: GroupKind) -> Result<Self> {
        let sort_asc = |domain: Domain| SortDomain {
            domain,
            order: SortOrder::Asc,
            pre_collated: false,
        };

        let descriptor = match kind {
            GroupKind::Book => {
                return Err(Error::invalid_grouping(
                    "Book is the implicit terminal level and cannot be grouped by",
                ))
            }
            GroupKind::Author => {
                let display = Domain::new("author_sort", DomainExpr::Author(AuthorField::SortName));
                Self {
                    kind,
                    display: display.clone(),
                    key: DomainExpr::Author(AuthorField::Id),
                    accumulated: Vec::new(),
                    sort: [sort_asc(display)].into(),
                    default_expanded: false,
                }
            }
            GroupKind::Series => {
                let display = Domain::new("series_title", DomainExpr::Series(SeriesField::Title));
                let number = Domain::new("series_number", DomainExpr::Series(SeriesField::Number));
                Self {
                    kind,
                    display: display.clone(),
                    key: DomainExpr::Series(SeriesField::Id),
                    // The number is carried for descendant rows; it sorts
                    // books at the book level, not the series headers.
                    accumulated: [number].into(),
                    sort: [sort_asc(display)].into(),
                    default_expanded: false,
                }
            }
            GroupKind::Publisher => {
                let display = Domain::new("publisher_name", DomainExpr::Publisher(PublisherField::Name));
                Self {
                    kind,
                    display: display.clone(),
                    key: DomainExpr::Publisher(PublisherField::Id),
                    accumulated: Vec::new(),
                    sort: [sort_asc(display)].into(),
                    default_expanded: false,
                }
            }
            GroupKind::Bookshelf => {
                let display = Domain::new("shelf_name", DomainExpr::Shelf(ShelfField::Name));
                Self {
                    kind,
                    display: display.clone(),
                    key: DomainExpr::Shelf(ShelfField::Id),
                    accumulated: Vec::new(),
                    sort: [sort_asc(display)].into(),
                    default_expanded: false,
                }
            }
            GroupKind::ReadStatus => {
                let display = Domain::new("read_status", DomainExpr::Book(BookField::Read));
                Self {
                    kind,
                    display: display.clone(),
                    key: DomainExpr::Book(BookField::Read),
                    accumulated: Vec::new(),
                    sort: [sort_asc(display)].into(),
                    default_expanded: true,
                }
            }
            GroupKind::Rating => {
                let display = Domain::new("rating", DomainExpr::Book(BookField::Rating));
                Self {
                    kind,
                    display: display.clone(),
                    key: DomainExpr::Book(BookField::Rating),
                    accumulated: Vec::new(),
                    // Highest rated groups first.
                    sort: [SortDomain {
                        domain: display,
                        order: SortOrder::Desc,
                        pre_collated: false,
                    }]
                    .into(),
                    default_expanded: false,
                }
            }
            GroupKind::Language => {
                let display = Domain::new("language", DomainExpr::Book(BookField::Language));
                Self {
                    kind,
                    display: display.clone(),
                    key: DomainExpr::Book(BookField::Language),
                    accumulated: Vec::new(),
                    sort: [sort_asc(display)].into(),
                    default_expanded: false,
                }
            }
            GroupKind::PublicationYear => {
                let display = Domain::new("publication_year", DomainExpr::Book(BookField::PublicationYear));
                Self {
                    kind,
                    display: display.clone(),
                    key: DomainExpr::Book(BookField::PublicationYear),
                    accumulated: Vec::new(),
                    // Newest first.
                    sort: [SortDomain {
                        domain: display,
                        order: SortOrder::Desc,
                        pre_collated: false,
                    }]
                    .into(),
                    default_expanded: false,
                }
            }
            GroupKind::TitleLetter => {
                let display = Domain::new(
                    "title_letter",
                    DomainExpr::FirstLetter(Box::new(DomainExpr::Book(BookField::Title))),
                );
                Self {
                    kind,
                    display: display.clone(),
                    key: display.expr.clone(),
                    accumulated: Vec::new(),
                    // FirstLetter already uppercases; no collation needed.
                    sort: [SortDomain {
                        domain: display,
                        order: SortOrder::Asc,
                        pre_collated: true,
                    }]
                    .into(),
                    default_expanded: false,
                }
            }
            GroupKind::Loaned => {
                let display = Domain::new("loanee", DomainExpr::Book(BookField::Loanee));
                Self {
                    kind,
                    display: display.clone(),
                    key: DomainExpr::Book(BookField::Loanee),
                    accumulated: Vec::new(),
                    sort: [sort_asc(display)].into(),
                    default_expanded: true,
                }
            }
        };
        Ok(descriptor)
    }

    #[inline]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    #[inline]
    pub fn display(&self) -> &Domain {
        &self.display
    }

    #[inline]
    pub fn key(&self) -> &DomainExpr {
        &self.key
    }

    #[inline]
    pub fn accumulated(&self) -> &[Domain] {
        &self.accumulated
    }

    #[inline]
    pub fn sort(&self) -> &[SortDomain] {
        &self.sort
    }

    #[inline]
    pub fn default_expanded(&self) -> bool {
        self.default_expanded
    }

    /// Overrides the per-level default expansion used by the
    /// PreferredPerStyle rebuild policy.
    pub fn with_default_expanded(mut self, expanded: bool) -> Self {
        self.default_expanded = expanded;
        self
    }
}

/// A user's grouping style: ordered group levels plus join-expansion flags.
#[derive(Clone, Debug)]
pub struct Style {
    name: String,
    groups: Vec<GroupDescriptor>,
    books_under_each_author: bool,
    books_under_each_series: bool,
    books_under_each_publisher: bool,
}

impl Style {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn groups(&self) -> &[GroupDescriptor] {
        &self.groups
    }

    /// Number of group levels; book rows sit at `group_count() + 1`.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn books_under_each_author(&self) -> bool {
        self.books_under_each_author
    }

    #[inline]
    pub fn books_under_each_series(&self) -> bool {
        self.books_under_each_series
    }

    #[inline]
    pub fn books_under_each_publisher(&self) -> bool {
        self.books_under_each_publisher
    }

    /// Returns true if some level groups by the given kind.
    pub fn groups_by(&self, kind: GroupKind) -> bool {
        self.groups.iter().any(|g| g.kind == kind)
    }
}

/// Builder for styles. Validates group kinds as they are added.
pub struct StyleBuilder {
    name: String,
    groups: Vec<GroupDescriptor>,
    books_under_each_author: bool,
    books_under_each_series: bool,
    books_under_each_publisher: bool,
}

impl StyleBuilder {
    /// Creates a new style builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
            books_under_each_author: false,
            books_under_each_series: false,
            books_under_each_publisher: false,
        }
    }

    /// Adds a grouping level. Rejects the Book kind and duplicates.
    pub fn add_group(self, kind: GroupKind) -> Result<Self> {
        let descriptor = GroupDescriptor::for_kind(kind)?;
        self.add_descriptor(descriptor)
    }

    /// Adds a grouping level with an explicit default-expanded flag.
    pub fn add_group_with_default(self, kind: GroupKind, expanded: bool) -> Result<Self> {
        let descriptor = GroupDescriptor::for_kind(kind)?.with_default_expanded(expanded);
        self.add_descriptor(descriptor)
    }

    fn add_descriptor(mut self, descriptor: GroupDescriptor) -> Result<Self> {
        if self.groups.iter().any(|g| g.kind == descriptor.kind) {
            return Err(Error::invalid_grouping("duplicate group kind"));
        }
        self.groups.push(descriptor);
        Ok(self)
    }

    /// Shows a book once under every author instead of only the primary.
    pub fn books_under_each_author(mut self, value: bool) -> Self {
        self.books_under_each_author = value;
        self
    }

    /// Shows a book once under every series it belongs to.
    pub fn books_under_each_series(mut self, value: bool) -> Self {
        self.books_under_each_series = value;
        self
    }

    /// Shows a book once under every publisher.
    pub fn books_under_each_publisher(mut self, value: bool) -> Self {
        self.books_under_each_publisher = value;
        self
    }

    /// Builds the style. A style with no groups produces a flat list.
    pub fn build(self) -> Style {
        Style {
            name: self.name,
            groups: self.groups,
            books_under_each_author: self.books_under_each_author,
            books_under_each_series: self.books_under_each_series,
            books_under_each_publisher: self.books_under_each_publisher,
        }
    }
}
