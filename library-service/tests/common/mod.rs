#![allow(dead_code)]

pub mod db;
pub mod memory;

use std::sync::Arc;
use std::time::Duration;

use auth::PasswordHasher;
use auth::SessionIssuer;
use library_service::domain::account::service::AccountService;
use library_service::domain::auth::service::CredentialService;
use library_service::domain::book::service::BookService;
use library_service::inbound::http::cookie::SessionCookie;
use library_service::inbound::http::router::create_router;
use memory::MemoryAccountRepository;
use memory::MemoryBookRepository;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const COOKIE_NAME: &str = "access_token";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    /// Client that keeps cookies between requests, like a browser.
    pub api_client: reqwest::Client,
    /// Client with no cookie store, for anonymous requests.
    pub anonymous_client: reqwest::Client,
    pub session_issuer: Arc<SessionIssuer>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let account_repository = Arc::new(MemoryAccountRepository::default());
        let book_repository = Arc::new(MemoryBookRepository::default());

        // Cheapest cost Argon2 accepts, to keep the suite fast
        let password_hasher =
            PasswordHasher::with_cost(1024, 1, 1).expect("Failed to build password hasher");
        let session_issuer = Arc::new(SessionIssuer::new(JWT_SECRET, chrono::Duration::minutes(60)));
        let deadline = Duration::from_secs(5);

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&account_repository),
            password_hasher.clone(),
            deadline,
        ));
        let book_service = Arc::new(BookService::new(book_repository, deadline));
        let credential_service = Arc::new(CredentialService::new(
            account_repository,
            password_hasher,
            Arc::clone(&session_issuer),
            deadline,
        )
        .expect("Failed to build credential service"));

        let router = create_router(
            account_service,
            book_service,
            credential_service,
            SessionCookie::new(COOKIE_NAME, false),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            anonymous_client: reqwest::Client::new(),
            session_issuer,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Helper to make GET request without any session cookie
    pub fn get_anonymous(&self, path: &str) -> reqwest::RequestBuilder {
        self.anonymous_client.get(self.url(path))
    }

    /// Helper to make GET request with Bearer token and no cookie
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.anonymous_client.get(self.url(path)).bearer_auth(token)
    }

    /// Sign up an account. The cookie-keeping client is logged in afterwards.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/signup")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
                "passwordConfirm": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign up a default account and return its JSON representation.
    pub async fn signup_default(&self) -> Value {
        let response = self
            .signup("Ana Pop", "ana@example.com", "correct-horse")
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["account"].clone()
    }
}

/// Session token carried by a `Set-Cookie` header, if any.
pub fn session_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| {
            value
                .split(';')
                .next()?
                .strip_prefix(&format!("{COOKIE_NAME}="))
                .map(str::to_string)
        })
}
