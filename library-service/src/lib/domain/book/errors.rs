use thiserror::Error;

use crate::domain::errors::StoreError;

/// Error for BookId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for book field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookFieldError {
    #[error("Title is required")]
    BlankTitle,

    #[error("Author is required")]
    BlankAuthor,

    #[error("Year published must be between 0 and {max}, got {actual}")]
    YearOutOfRange { max: i64, actual: i64 },
}

/// Top-level error for all catalog operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid book ID: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Invalid book: {0}")]
    InvalidField(#[from] BookFieldError),

    #[error("No valid fields to update")]
    NoFieldsToUpdate,

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for BookError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => BookError::NotFound(id),
            other => BookError::Store(other),
        }
    }
}
