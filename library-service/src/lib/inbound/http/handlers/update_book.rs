use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::get_book::parse_book_id;
use super::get_book::BookData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::book::errors::BookFieldError;
use crate::domain::book::models::Author;
use crate::domain::book::models::BookPatch;
use crate::domain::book::models::Title;
use crate::domain::book::models::YearPublished;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    Json(body): Json<UpdateBookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = parse_book_id(&book_id)?;
    let patch = body
        .try_into_patch()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .book_service
        .update_book(&book_id, patch)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}

/// Partial update body. A present title or author must be non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateBookRequest {
    title: Option<String>,
    author: Option<String>,
    year_published: Option<i64>,
    genre: Option<String>,
}

impl UpdateBookRequest {
    fn try_into_patch(self) -> Result<BookPatch, BookFieldError> {
        Ok(BookPatch {
            title: self.title.as_deref().map(Title::new).transpose()?,
            author: self.author.as_deref().map(Author::new).transpose()?,
            year_published: self.year_published.map(YearPublished::new).transpose()?,
            genre: self.genre.map(|genre| genre.trim().to_string()),
        })
    }
}
