//! Domain expression definitions.
//!
//! A `Domain` is a named, typed column of the materialized list; its
//! `DomainExpr` says how to compute the value from one joined book context.
//! Expressions are plain data so two requests for the same domain can be
//! compared structurally during de-duplication.

use crate::context::BookContext;
use alloc::boxed::Box;
use alloc::string::String;
use shelfview_core::{DataType, Value};

/// Fields of the book record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookField {
    Id,
    Title,
    Isbn,
    Read,
    Rating,
    Language,
    Loanee,
    PublicationYear,
    DateAdded,
}

/// Fields of the joined author (and its link row).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorField {
    Id,
    FamilyName,
    GivenNames,
    /// "Family, Given" display form.
    SortName,
}

/// Fields of the joined series (and its link row).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesField {
    Id,
    Title,
    /// Free-form number within the series, from the link row.
    Number,
}

/// Fields of the joined publisher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublisherField {
    Id,
    Name,
}

/// Fields of the joined bookshelf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShelfField {
    Id,
    Name,
}

/// A typed expression over one joined book context.
#[derive(Clone, Debug, PartialEq)]
pub enum DomainExpr {
    /// Book record field.
    Book(BookField),
    /// Joined author field; Null when the book has no author row.
    Author(AuthorField),
    /// Joined series field; Null when the book is in no series.
    Series(SeriesField),
    /// Joined publisher field; Null when the book has no publisher.
    Publisher(PublisherField),
    /// Joined bookshelf field; Null outside per-shelf expansion.
    Shelf(ShelfField),
    /// Literal value.
    Literal(Value),
    /// Uppercased first letter of the inner expression's text value.
    FirstLetter(Box<DomainExpr>),
}

impl DomainExpr {
    /// Returns the data type this expression evaluates to.
    pub fn data_type(&self) -> DataType {
        match self {
            DomainExpr::Book(f) => match f {
                BookField::Id | BookField::Rating | BookField::PublicationYear => DataType::Int64,
                BookField::Read => DataType::Boolean,
                BookField::DateAdded => DataType::DateTime,
                _ => DataType::String,
            },
            DomainExpr::Author(f) => match f {
                AuthorField::Id => DataType::Int64,
                _ => DataType::String,
            },
            DomainExpr::Series(f) => match f {
                SeriesField::Id => DataType::Int64,
                _ => DataType::String,
            },
            DomainExpr::Publisher(f) => match f {
                PublisherField::Id => DataType::Int64,
                PublisherField::Name => DataType::String,
            },
            DomainExpr::Shelf(f) => match f {
                ShelfField::Id => DataType::Int64,
                ShelfField::Name => DataType::String,
            },
            DomainExpr::Literal(v) => v.data_type().unwrap_or(DataType::String),
            DomainExpr::FirstLetter(_) => DataType::String,
        }
    }

    /// Evaluates the expression against one joined book context.
    /// Missing joined entities evaluate to Null (left-join semantics).
    pub fn eval(&self, ctx: &BookContext<'_>) -> Value {
        match self {
            DomainExpr::Book(f) => match f {
                BookField::Id => Value::Int64(ctx.book.id),
                BookField::Title => Value::String(ctx.book.title.clone()),
                BookField::Isbn => Value::String(ctx.book.isbn.clone()),
                BookField::Read => Value::Boolean(ctx.book.read),
                BookField::Rating => Value::Int64(ctx.book.rating),
                BookField::Language => Value::String(ctx.book.language.clone()),
                BookField::Loanee => match &ctx.book.loaned_to {
                    Some(name) => Value::String(name.clone()),
                    None => Value::Null,
                },
                BookField::PublicationYear => match ctx.book.publication_year {
                    Some(y) => Value::Int64(y),
                    None => Value::Null,
                },
                BookField::DateAdded => Value::DateTime(ctx.book.date_added),
            },
            DomainExpr::Author(f) => match (ctx.author, f) {
                (Some(a), AuthorField::Id) => Value::Int64(a.id),
                (Some(a), AuthorField::FamilyName) => Value::String(a.family_name.clone()),
                (Some(a), AuthorField::GivenNames) => Value::String(a.given_names.clone()),
                (Some(a), AuthorField::SortName) => Value::String(a.sort_name()),
                (None, _) => Value::Null,
            },
            DomainExpr::Series(f) => match f {
                SeriesField::Id => match ctx.series {
                    Some(s) => Value::Int64(s.id),
                    None => Value::Null,
                },
                SeriesField::Title => match ctx.series {
                    Some(s) => Value::String(s.title.clone()),
                    None => Value::Null,
                },
                SeriesField::Number => match ctx.series_link {
                    Some(l) => Value::String(l.number.clone()),
                    None => Value::Null,
                },
            },
            DomainExpr::Publisher(f) => match (ctx.publisher, f) {
                (Some(p), PublisherField::Id) => Value::Int64(p.id),
                (Some(p), PublisherField::Name) => Value::String(p.name.clone()),
                (None, _) => Value::Null,
            },
            DomainExpr::Shelf(f) => match (ctx.shelf, f) {
                (Some(s), ShelfField::Id) => Value::Int64(s.id),
                (Some(s), ShelfField::Name) => Value::String(s.name.clone()),
                (None, _) => Value::Null,
            },
            DomainExpr::Literal(v) => v.clone(),
            DomainExpr::FirstLetter(inner) => {
                let v = inner.eval(ctx);
                match v.as_str().and_then(|s| s.chars().next()) {
                    Some(c) => {
                        let upper: String = c.to_uppercase().collect();
                        Value::String(upper)
                    }
                    None => Value::Null,
                }
            }
        }
    }
}

/// A named, typed column of the materialized list.
#[derive(Clone, Debug, PartialEq)]
pub struct Domain {
    pub name: String,
    pub data_type: DataType,
    pub expr: DomainExpr,
}

impl Domain {
    /// Creates a new domain. The data type is derived from the expression.
    pub fn new(name: impl Into<String>, expr: DomainExpr) -> Self {
        let data_type = expr.data_type();
        Self {
            name: name.into(),
            data_type,
            expr,
        }
    }
}

/// Sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One resolved key of the plan's ORDER BY chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
    /// Index into the plan's domain list.
    pub domain: usize,
    pub order: SortOrder,
    /// Whether text comparison applies case-insensitive collation.
    /// False for non-text domains and for pre-collated text domains.
    pub collated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfview_catalog::{Author, Book};

    fn sample_book() -> Book {
        Book {
            id: 7,
            title: "the dispossessed".into(),
            isbn: "".into(),
            read: true,
            rating: 5,
            language: "eng".into(),
            loaned_to: None,
            publication_year: Some(1974),
            date_added: 1000,
        }
    }

    #[test]
    fn test_book_field_eval() {
        let book = sample_book();
        let ctx = BookContext::book_only(&book);

        assert_eq!(DomainExpr::Book(BookField::Id).eval(&ctx), Value::Int64(7));
        assert_eq!(
            DomainExpr::Book(BookField::Read).eval(&ctx),
            Value::Boolean(true)
        );
        assert_eq!(DomainExpr::Book(BookField::Loanee).eval(&ctx), Value::Null);
        assert_eq!(
            DomainExpr::Book(BookField::PublicationYear).eval(&ctx),
            Value::Int64(1974)
        );
    }

    #[test]
    fn test_missing_author_is_null() {
        let book = sample_book();
        let ctx = BookContext::book_only(&book);
        assert_eq!(DomainExpr::Author(AuthorField::SortName).eval(&ctx), Value::Null);
    }

    #[test]
    fn test_author_sort_name_eval() {
        let book = sample_book();
        let author = Author {
            id: 3,
            family_name: "Le Guin".into(),
            given_names: "Ursula K.".into(),
        };
        let mut ctx = BookContext::book_only(&book);
        ctx.author = Some(&author);

        assert_eq!(
            DomainExpr::Author(AuthorField::SortName).eval(&ctx),
            Value::String("Le Guin, Ursula K.".into())
        );
    }

    #[test]
    fn test_first_letter_uppercases() {
        let book = sample_book();
        let ctx = BookContext::book_only(&book);
        let expr = DomainExpr::FirstLetter(Box::new(DomainExpr::Book(BookField::Title)));
        assert_eq!(expr.eval(&ctx), Value::String("T".into()));
    }

    #[test]
    fn test_domain_type_derivation() {
        let d = Domain::new("rating", DomainExpr::Book(BookField::Rating));
        assert_eq!(d.data_type, DataType::Int64);
        let d = Domain::new("title", DomainExpr::Book(BookField::Title));
        assert_eq!(d.data_type, DataType::String);
    }
}
