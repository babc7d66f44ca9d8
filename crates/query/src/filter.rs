//! List filters.
//!
//! Filters contribute boolean predicates over the joined book context and
//! are combined with AND at build time. A blank filter is inactive and is
//! silently dropped by the builder rather than treated as an error.

use crate::context::BookContext;
use alloc::string::String;
use alloc::vec::Vec;
use shelfview_core::collation::{contains_ignore_case, eq_ignore_case};
use shelfview_catalog::{BookId, BookshelfId};

/// A predicate over the book/join domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Exact (case-insensitive) match on the loanee name.
    Loanee(String),
    /// Every whitespace-separated word must occur (case-insensitive) in
    /// the title, an author name, or a series title.
    Keywords(String),
    /// Explicit allow-list of book ids.
    BookIdList(Vec<BookId>),
    /// Book must be a member of the given bookshelf.
    OnBookshelf(BookshelfId),
}

impl Filter {
    /// Whether this filter constrains anything. Blank text and empty id
    /// lists are inactive.
    pub fn is_active(&self) -> bool {
        match self {
            Filter::Loanee(name) => !name.trim().is_empty(),
            Filter::Keywords(words) => !words.trim().is_empty(),
            Filter::BookIdList(ids) => !ids.is_empty(),
            Filter::OnBookshelf(_) => true,
        }
    }

    /// Evaluates the filter against one joined context.
    pub fn matches(&self, ctx: &BookContext<'_>) -> bool {
        match self {
            Filter::Loanee(name) => match &ctx.book.loaned_to {
                Some(loanee) => eq_ignore_case(loanee, name.trim()),
                None => false,
            },
            Filter::Keywords(words) => {
                words.split_whitespace().all(|word| self.word_matches(ctx, word))
            }
            Filter::BookIdList(ids) => ids.contains(&ctx.book.id),
            Filter::OnBookshelf(shelf_id) => match ctx.shelf {
                // Under per-shelf expansion each context row belongs to one
                // shelf; otherwise fall back to the book's memberships.
                Some(shelf) => shelf.id == *shelf_id,
                None => ctx.shelf_links.iter().any(|l| l.bookshelf_id == *shelf_id),
            },
        }
    }

    fn word_matches(&self, ctx: &BookContext<'_>, word: &str) -> bool {
        if contains_ignore_case(&ctx.book.title, word) {
            return true;
        }
        if let Some(author) = ctx.author {
            if contains_ignore_case(&author.family_name, word)
                || contains_ignore_case(&author.given_names, word)
            {
                return true;
            }
        }
        if let Some(series) = ctx.series {
            if contains_ignore_case(&series.title, word) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use shelfview_catalog::Book;

    fn sample_book(loaned_to: Option<&str>) -> Book {
        Book {
            id: 1,
            title: "A Wizard of Earthsea".into(),
            isbn: "".into(),
            read: false,
            rating: 0,
            language: "eng".into(),
            loaned_to: loaned_to.map(Into::into),
            publication_year: Some(1968),
            date_added: 0,
        }
    }

    #[test]
    fn test_blank_filters_inactive() {
        assert!(!Filter::Loanee("".into()).is_active());
        assert!(!Filter::Loanee("   ".into()).is_active());
        assert!(!Filter::Keywords("".into()).is_active());
        assert!(!Filter::BookIdList(vec![]).is_active());
        assert!(Filter::OnBookshelf(1).is_active());
    }

    #[test]
    fn test_loanee_exact_ignore_case() {
        let book = sample_book(Some("Alice"));
        let ctx = BookContext::book_only(&book);
        assert!(Filter::Loanee("alice".into()).matches(&ctx));
        assert!(!Filter::Loanee("bob".into()).matches(&ctx));

        let unloaned = sample_book(None);
        let ctx = BookContext::book_only(&unloaned);
        assert!(!Filter::Loanee("alice".into()).matches(&ctx));
    }

    #[test]
    fn test_keywords_all_words_must_match() {
        let book = sample_book(None);
        let ctx = BookContext::book_only(&book);
        assert!(Filter::Keywords("wizard earthsea".into()).matches(&ctx));
        assert!(!Filter::Keywords("wizard mars".into()).matches(&ctx));
    }

    #[test]
    fn test_book_id_list() {
        let book = sample_book(None);
        let ctx = BookContext::book_only(&book);
        assert!(Filter::BookIdList(vec![1, 5]).matches(&ctx));
        assert!(!Filter::BookIdList(vec![2, 5]).matches(&ctx));
    }
}
