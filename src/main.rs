use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use billdesk::{
  adapters::http::{RequestIdMiddleware, configure_api_routes, configure_system_routes},
  infrastructure::{
    config::{Config, DatabaseConfig},
    metrics,
    wiring::{Repositories, build_use_cases},
  },
};

/// Connects with a bounded wait and brings the schema up to date.
async fn connect_database(config: &DatabaseConfig) -> anyhow::Result<sqlx::PgPool> {
  tracing::info!("Connecting to database: {}", config.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.max_connections)
      .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
      .connect(&config.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.connect_timeout_seconds
    );
    anyhow::anyhow!(
      "Database connection timed out after {} seconds",
      config.connect_timeout_seconds
    )
  })?
  .with_context(|| format!("Could not connect to database at {}", config.url))?;

  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  Ok(db_pool)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "billdesk=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting BillDesk application");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  // Volatile storage for demos and local runs without PostgreSQL
  let repositories = if std::env::var("IN_MEMORY_STORAGE").is_ok_and(|v| v == "true") {
    tracing::warn!("Using in-memory storage, data is lost on restart");
    Repositories::in_memory()
  } else {
    Repositories::postgres(connect_database(&config.database).await?)
  };

  let use_cases = build_use_cases(&repositories, &config)
    .await
    .context("Failed to assemble services")?;

  metrics::init_metrics();

  let bind_address = format!("{}:{}", config.server.host, config.server.port);
  tracing::info!("Starting HTTP server on {}", bind_address);

  let billing = web::Data::new(config.billing.clone());
  let rate_limit = config.rate_limit.clone();

  HttpServer::new(move || {
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .app_data(billing.clone())
      .configure(configure_system_routes)
      .configure(|cfg| configure_api_routes(cfg, &use_cases, &rate_limit))
  })
  .bind(&bind_address)
  .with_context(|| format!("Failed to bind {}", bind_address))?
  .run()
  .await?;

  Ok(())
}
