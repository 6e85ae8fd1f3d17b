use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::domain::book::models::Author;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookPatch;
use crate::domain::book::models::Title;
use crate::domain::book::models::YearPublished;
use crate::domain::errors::StoreError;
use crate::domain::query::FilterSpec;
use crate::domain::repository::CrudRepository;
use crate::domain::repository::Page;
use crate::outbound::repositories::sql;
use crate::outbound::repositories::store_error;

const SELECT_BOOKS: &str = "SELECT id, title, author, year_published, genre FROM books";

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    year_published: i32,
    genre: String,
}

impl TryFrom<BookRow> for Book {
    type Error = StoreError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let invalid = |e: crate::domain::book::errors::BookFieldError| {
            StoreError::Database(format!("Invalid stored book {}: {e}", row.id))
        };

        Ok(Book {
            id: BookId(row.id),
            title: Title::new(&row.title).map_err(invalid)?,
            author: Author::new(&row.author).map_err(invalid)?,
            year_published: YearPublished::new(i64::from(row.year_published)).map_err(invalid)?,
            genre: row.genre,
        })
    }
}

fn column(field: &str) -> Option<&'static str> {
    match field {
        "title" => Some("title"),
        "author" => Some("author"),
        "genre" => Some("genre"),
        "yearPublished" => Some("year_published"),
        _ => None,
    }
}

fn constraint_field(_constraint: &str) -> Option<&'static str> {
    None
}

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository for PostgresBookRepository {
    type Entity = Book;
    type Id = BookId;
    type Patch = BookPatch;

    async fn create(&self, book: Book) -> Result<Book, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, year_published, genre)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(book.id.0)
        .bind(book.title.as_str())
        .bind(book.author.as_str())
        .bind(book.year_published.value())
        .bind(&book.genre)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(e, constraint_field))?;

        Ok(book)
    }

    async fn get_by_id(&self, id: &BookId) -> Result<Book, StoreError> {
        let row = sqlx::query_as::<_, BookRow>(&format!("{SELECT_BOOKS} WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, constraint_field))?;

        match row {
            Some(row) => Book::try_from(row),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        sqlx::query_as::<_, BookRow>(&format!("{SELECT_BOOKS} ORDER BY title ASC, id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error(e, constraint_field))?
            .into_iter()
            .map(Book::try_from)
            .collect()
    }

    async fn list_with_query(&self, spec: &FilterSpec) -> Result<Page<Book>, StoreError> {
        let fetch = async {
            let mut query = QueryBuilder::<Postgres>::new(SELECT_BOOKS);
            sql::push_where(&mut query, &spec.filter, column);
            sql::push_order_by(&mut query, &spec.sort, column);
            sql::push_page(&mut query, spec);
            query.build_query_as::<BookRow>().fetch_all(&self.pool).await
        };
        let count = async {
            let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
            sql::push_where(&mut query, &spec.filter, column);
            query.build_query_scalar::<i64>().fetch_one(&self.pool).await
        };

        let (rows, total) =
            tokio::try_join!(fetch, count).map_err(|e| store_error(e, constraint_field))?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(Book::try_from)
                .collect::<Result<_, _>>()?,
            total,
        })
    }

    async fn update_fields(&self, id: &BookId, patch: BookPatch) -> Result<bool, StoreError> {
        if patch.is_empty() {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                .bind(id.0)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| store_error(e, constraint_field))?;
            return Ok(exists);
        }

        let mut query = QueryBuilder::<Postgres>::new("UPDATE books SET ");
        {
            let mut assignments = query.separated(", ");
            if let Some(title) = patch.title {
                assignments
                    .push("title = ")
                    .push_bind_unseparated(title.as_str().to_string());
            }
            if let Some(author) = patch.author {
                assignments
                    .push("author = ")
                    .push_bind_unseparated(author.as_str().to_string());
            }
            if let Some(year) = patch.year_published {
                assignments
                    .push("year_published = ")
                    .push_bind_unseparated(year.value());
            }
            if let Some(genre) = patch.genre {
                assignments.push("genre = ").push_bind_unseparated(genre);
            }
        }
        query.push(" WHERE id = ").push_bind(id.0);

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(e, constraint_field))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: &BookId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(e, constraint_field))?;

        Ok(result.rows_affected() > 0)
    }
}
