use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookPatch;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;
use crate::domain::deadline;
use crate::domain::query::FilterSpec;
use crate::domain::repository::Page;

/// Catalog management. Books carry no uniqueness rules beyond identity.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
    deadline: Duration,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>, deadline: Duration) -> Self {
        Self {
            repository,
            deadline,
        }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        let book = Book {
            id: BookId::new(),
            title: command.title,
            author: command.author,
            year_published: command.year_published,
            genre: command.genre,
        };

        let book = deadline::within(self.deadline, async {
            self.repository.create(book).await.map_err(BookError::from)
        })
        .await?;

        tracing::info!(book_id = %book.id, title = book.title.as_str(), "Book created");
        Ok(book)
    }

    async fn get_book(&self, id: &BookId) -> Result<Book, BookError> {
        deadline::within(self.deadline, async {
            self.repository.get_by_id(id).await.map_err(BookError::from)
        })
        .await
    }

    async fn list_books(&self, spec: FilterSpec) -> Result<Page<Book>, BookError> {
        deadline::within(self.deadline, async {
            self.repository
                .list_with_query(&spec)
                .await
                .map_err(BookError::from)
        })
        .await
    }

    async fn update_book(&self, id: &BookId, patch: BookPatch) -> Result<Book, BookError> {
        if patch.is_empty() {
            return Err(BookError::NoFieldsToUpdate);
        }

        let book = deadline::within(self.deadline, async {
            if !self.repository.update_fields(id, patch).await? {
                return Err(BookError::NotFound(id.to_string()));
            }
            self.repository.get_by_id(id).await.map_err(BookError::from)
        })
        .await?;

        tracing::info!(book_id = %id, "Book updated");
        Ok(book)
    }

    async fn delete_book(&self, id: &BookId) -> Result<(), BookError> {
        let deleted = deadline::within(self.deadline, async {
            self.repository.delete_by_id(id).await.map_err(BookError::from)
        })
        .await?;

        if !deleted {
            return Err(BookError::NotFound(id.to_string()));
        }

        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}
