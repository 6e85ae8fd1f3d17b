use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::MakeRequestUuid;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::request_id::SetRequestIdLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookie::SessionCookie;
use super::handlers::create_account::create_account;
use super::handlers::create_book::create_book;
use super::handlers::current_session::current_session;
use super::handlers::delete_account::delete_account;
use super::handlers::delete_book::delete_book;
use super::handlers::get_account::get_account;
use super::handlers::get_book::get_book;
use super::handlers::list_accounts::list_accounts;
use super::handlers::list_books::list_books;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::signup::signup;
use super::handlers::update_account::update_account;
use super::handlers::update_book::update_book;
use super::middleware::require_session;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::auth::ports::CredentialServicePort;
use crate::domain::book::ports::BookServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub book_service: Arc<dyn BookServicePort>,
    pub credential_service: Arc<dyn CredentialServicePort>,
    pub session_cookie: Arc<SessionCookie>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    book_service: Arc<dyn BookServicePort>,
    credential_service: Arc<dyn CredentialServicePort>,
    session_cookie: SessionCookie,
) -> Router {
    let state = AppState {
        account_service,
        book_service,
        credential_service,
        session_cookie: Arc::new(session_cookie),
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/books", get(list_books).post(create_book))
        .route(
            "/api/v1/books/:book_id",
            get(get_book).put(update_book).delete(delete_book),
        );

    let protected_routes = Router::new()
        .route("/api/v1/auth/session", get(current_session))
        .route("/api/v1/users", get(list_accounts).post(create_account))
        .route(
            "/api/v1/users/:account_id",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                request_id,
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(trace_layer),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
