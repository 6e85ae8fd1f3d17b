use std::fmt;

use uuid::Uuid;

use crate::domain::book::errors::BookFieldError;
use crate::domain::book::errors::BookIdError;
use crate::domain::query::FieldKind;
use crate::domain::query::ListPolicy;

/// Whitelist for catalog listings.
pub const BOOK_LIST_POLICY: ListPolicy = ListPolicy {
    fields: &[
        ("title", FieldKind::String),
        ("author", FieldKind::String),
        ("genre", FieldKind::String),
        ("yearPublished", FieldKind::Int),
    ],
    sortable: &["title", "author", "genre", "yearPublished"],
    default_sort: "title",
    default_limit: 20,
    max_limit: 100,
};

/// Catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: Title,
    pub author: Author,
    pub year_published: YearPublished,
    /// Free text, may be empty.
    pub genre: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        Uuid::parse_str(s)
            .map(BookId)
            .map_err(|e| BookIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-blank, trimmed title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn new(title: &str) -> Result<Self, BookFieldError> {
        match title.trim() {
            "" => Err(BookFieldError::BlankTitle),
            title => Ok(Self(title.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-blank, trimmed author name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author(String);

impl Author {
    pub fn new(author: &str) -> Result<Self, BookFieldError> {
        match author.trim() {
            "" => Err(BookFieldError::BlankAuthor),
            author => Ok(Self(author.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Publication year, `0..=i32::MAX` so it fits the store column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearPublished(i32);

impl YearPublished {
    pub fn new(year: i64) -> Result<Self, BookFieldError> {
        i32::try_from(year)
            .ok()
            .filter(|year| *year >= 0)
            .map(Self)
            .ok_or(BookFieldError::YearOutOfRange {
                max: i64::from(i32::MAX),
                actual: year,
            })
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Command to add a book to the catalog
#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    pub title: Title,
    pub author: Author,
    pub year_published: YearPublished,
    pub genre: String,
}

impl CreateBookCommand {
    pub fn new(title: Title, author: Author, year_published: YearPublished, genre: &str) -> Self {
        Self {
            title,
            author,
            year_published,
            genre: genre.trim().to_string(),
        }
    }
}

/// Partial replacement of book fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<Title>,
    pub author: Option<Author>,
    pub year_published: Option<YearPublished>,
    pub genre: Option<String>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.year_published.is_none()
            && self.genre.is_none()
    }
}
