use std::sync::Arc;

use auth::PasswordHasher;
use auth::SessionIssuer;
use library_service::config::Config;
use library_service::domain::account::service::AccountService;
use library_service::domain::auth::service::CredentialService;
use library_service::domain::book::service::BookService;
use library_service::inbound::http::cookie::SessionCookie;
use library_service::inbound::http::router::create_router;
use library_service::outbound::database;
use library_service::outbound::repositories::PostgresAccountRepository;
use library_service::outbound::repositories::PostgresBookRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "library-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        session_ttl_minutes = config.jwt.ttl_minutes,
        cookie_name = %config.cookie.name,
        "Configuration loaded"
    );

    let pg_pool = database::connect(&config.database).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    database::ensure_collections(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database schema ensured");

    let password_hasher = PasswordHasher::with_cost(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let session_issuer = Arc::new(SessionIssuer::new(
        config.jwt.secret.as_bytes(),
        config.jwt.ttl(),
    ));
    let deadline = config.server.request_timeout();

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let book_repository = Arc::new(PostgresBookRepository::new(pg_pool));

    let account_service = Arc::new(AccountService::new(
        Arc::clone(&account_repository),
        password_hasher.clone(),
        deadline,
    ));
    let book_service = Arc::new(BookService::new(book_repository, deadline));
    let credential_service = Arc::new(CredentialService::new(
        account_repository,
        password_hasher,
        session_issuer,
        deadline,
    )?);

    let http_application = create_router(
        account_service,
        book_service,
        credential_service,
        SessionCookie::from(&config.cookie),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
