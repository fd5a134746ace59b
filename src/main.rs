use crate::config::BookstoreConfig;
use crate::database::sqlite::{run_migrations, SqliteRepository};
use crate::database::BookRepository;
use anyhow::Context;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod config;
mod database;
mod domain;
mod features;
mod telemetry;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) repo: Arc<dyn BookRepository>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables, a missing .env file is fine
    dotenv::dotenv().ok();

    let config = BookstoreConfig::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(config.log_format)?;

    let pool = connect_pool(&config).await?;

    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let app_state = AppState {
        repo: Arc::new(SqliteRepository::new(pool.clone(), config.query_timeout)),
    };

    let app = build_router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // in-flight requests have drained by now
    pool.close().await;
    tracing::info!("database pool closed, bye");

    Ok(())
}

async fn connect_pool(config: &BookstoreConfig) -> anyhow::Result<Pool<Sqlite>> {
    // verify db exists
    if !Sqlite::database_exists(&config.database_url)
        .await
        .unwrap_or(false)
    {
        tracing::warn!(database_url = %config.database_url, "database not found, creating");
        Sqlite::create_database(&config.database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", config.database_url))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.query_timeout)
        .connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", config.database_url))?;

    tracing::info!(
        database_url = %config.database_url,
        max_connections = config.max_connections,
        "connected to database"
    );
    Ok(pool)
}

pub(crate) fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(features::health::healthz_handler))
        .merge(features::books::books_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
