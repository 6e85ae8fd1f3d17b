use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::get_book::BookData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::book::errors::BookFieldError;
use crate::domain::book::models::Author;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::Title;
use crate::domain::book::models::YearPublished;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_book(
    State(state): State<AppState>,
    Json(body): Json<CreateBookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let command = body
        .try_into_command()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .book_service
        .create_book(command)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}

/// HTTP request body for adding a book (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateBookRequest {
    title: String,
    author: String,
    year_published: i64,
    genre: String,
}

impl CreateBookRequest {
    fn try_into_command(self) -> Result<CreateBookCommand, BookFieldError> {
        Ok(CreateBookCommand::new(
            Title::new(&self.title)?,
            Author::new(&self.author)?,
            YearPublished::new(self.year_published)?,
            &self.genre,
        ))
    }
}
