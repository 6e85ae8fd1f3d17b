use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::get_book::parse_book_id;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let book_id = parse_book_id(&book_id)?;

    state
        .book_service
        .delete_book(&book_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
