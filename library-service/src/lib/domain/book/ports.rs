use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookPatch;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::query::FilterSpec;
use crate::domain::repository::CrudRepository;
use crate::domain::repository::Page;

/// Port for catalog operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `Store` - Database operation failed or timed out
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `Store` - Database operation failed or timed out
    async fn get_book(&self, id: &BookId) -> Result<Book, BookError>;

    async fn list_books(&self, spec: FilterSpec) -> Result<Page<Book>, BookError>;

    /// Apply a partial update and return the stored record.
    ///
    /// # Errors
    /// * `NoFieldsToUpdate` - Patch is empty
    /// * `NotFound` - Book does not exist
    /// * `Store` - Database operation failed or timed out
    async fn update_book(&self, id: &BookId, patch: BookPatch) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `Store` - Database operation failed or timed out
    async fn delete_book(&self, id: &BookId) -> Result<(), BookError>;
}

/// Persistence operations for books.
pub trait BookRepository: CrudRepository<Entity = Book, Id = BookId, Patch = BookPatch> {}

impl<T> BookRepository for T where T: CrudRepository<Entity = Book, Id = BookId, Patch = BookPatch> {}
