use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_api::{app, AppState};
use trip_catalog::{PackageSearch, PricingEngine};
use trip_store::{
    app_config::Config, DbClient, PostgresCategoryRepository, PostgresCustomPackageRepository,
    PostgresOfferRepository, PostgresPackageRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_api=debug,trip_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting trip package API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to Postgres")?;
    if config.database.run_migrations {
        db.migrate().await.context("Failed to run migrations")?;
    }

    let app_state = AppState {
        category_repo: Arc::new(PostgresCategoryRepository::new(db.pool.clone())),
        package_repo: Arc::new(PostgresPackageRepository::new(db.pool.clone())),
        offer_repo: Arc::new(PostgresOfferRepository::new(db.pool.clone())),
        custom_package_repo: Arc::new(PostgresCustomPackageRepository::new(db.pool.clone())),
        pricing: Arc::new(PricingEngine::new(config.pricing.clone())),
        search: Arc::new(PackageSearch::new(config.search.page_size)),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
