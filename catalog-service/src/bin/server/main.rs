use std::sync::Arc;

use auth::Authenticator;
use catalog_service::brand::models::Brand;
use catalog_service::config::BootstrapConfig;
use catalog_service::config::Config;
use catalog_service::config::StoreBackend;
use catalog_service::domain::user::models::CreateUserCommand;
use catalog_service::domain::user::models::EmailAddress;
use catalog_service::domain::user::models::Password;
use catalog_service::domain::user::models::Username;
use catalog_service::inbound::http::create_router;
use catalog_service::inbound::http::AppState;
use catalog_service::product::models::Product;
use catalog_service::repositories::connect;
use catalog_service::repositories::MemoryRepository;
use catalog_service::repositories::MongoRepository;
use catalog_service::user::models::User;
use chrono::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        database = %config.database.name,
        http_port = config.server.http_port,
        api_prefix = %config.api.prefix,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        Duration::minutes(config.jwt.expiration_minutes),
    ));

    let state = match config.database.backend {
        StoreBackend::Mongodb => {
            let database = connect(&config.database).await?;

            let users = Arc::new(MongoRepository::<User>::new(&database));
            let products = Arc::new(MongoRepository::<Product>::new(&database));
            let brands = Arc::new(MongoRepository::<Brand>::new(&database));

            users.ensure_indexes().await?;
            products.ensure_indexes().await?;
            brands.ensure_indexes().await?;
            tracing::info!(database = "mongodb", "Unique indexes created");

            AppState::new(users, products, brands, authenticator, config.api.clone())
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");

            AppState::new(
                Arc::new(MemoryRepository::<User>::new()),
                Arc::new(MemoryRepository::<Product>::new()),
                Arc::new(MemoryRepository::<Brand>::new()),
                authenticator,
                config.api.clone(),
            )
        }
    };

    if let Some(bootstrap) = &config.bootstrap {
        bootstrap_user(&state, bootstrap).await?;
    }

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

/// Create the configured initial account when no user exists yet.
async fn bootstrap_user(state: &AppState, bootstrap: &BootstrapConfig) -> anyhow::Result<()> {
    let command = CreateUserCommand::new(
        Username::new(bootstrap.username.clone())?,
        EmailAddress::new(bootstrap.email.clone())?,
        Password::new(bootstrap.password.clone())?,
    );

    match state.user_service.bootstrap_user(command).await? {
        Some(user) => tracing::info!(username = %user.username, "Bootstrap user created"),
        None => tracing::debug!("Users present, bootstrap skipped"),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
