use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::auth::errors::AuthError;
use crate::domain::book::errors::BookError;
use crate::domain::errors::StoreError;
use crate::domain::repository::Page;
use crate::domain::query::FilterSpec;

pub mod create_account;
pub mod create_book;
pub mod current_session;
pub mod delete_account;
pub mod delete_book;
pub mod get_account;
pub mod get_book;
pub mod list_accounts;
pub mod list_books;
pub mod login;
pub mod logout;
pub mod signup;
pub mod update_account;
pub mod update_book;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// The single message for every login or session failure.
    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized("Invalid credentials".to_string())
    }

    /// Log the cause and hide it from the client.
    fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed");
        ApiError::InternalServerError("Internal server error".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::Duplicate { .. } => ApiError::Conflict(err.to_string()),
            StoreError::Database(_) | StoreError::Timeout(_) => ApiError::internal(err),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::EmailAlreadyExists(_) | AccountError::PhoneAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidName(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidPhone(_)
            | AccountError::InvalidPassword(_)
            | AccountError::NoFieldsToUpdate => ApiError::BadRequest(err.to_string()),
            AccountError::Password(_) => ApiError::internal(err),
            AccountError::Store(store) => ApiError::from(store),
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(_) => ApiError::NotFound(err.to_string()),
            BookError::InvalidBookId(_)
            | BookError::InvalidField(_)
            | BookError::NoFieldsToUpdate => ApiError::BadRequest(err.to_string()),
            BookError::Store(store) => ApiError::from(store),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingField(_) | AuthError::PasswordMismatch => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::Account(account) => ApiError::from(account),
            AuthError::InvalidCredentials => ApiError::invalid_credentials(),
            AuthError::InvalidToken(_) => {
                ApiError::Unauthorized("Invalid or expired session".to_string())
            }
            AuthError::TokenIssue(_) => ApiError::internal(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Paged listing payload: `{items, page, limit, total}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListResponseData<T: Serialize + PartialEq> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl<T: Serialize + PartialEq> ListResponseData<T> {
    pub fn from_page<E>(page: Page<E>, spec: &FilterSpec, item: impl Fn(&E) -> T) -> Self {
        Self {
            items: page.items.iter().map(item).collect(),
            page: spec.page,
            limit: spec.limit,
            total: page.total,
        }
    }
}
