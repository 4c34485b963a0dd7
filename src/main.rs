use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use mbcb_quote::cache::AppCache;
use mbcb_quote::config::Config;
use mbcb_quote::pricing::BarrierConfig;
use mbcb_quote::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mbcb_quote=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!()
        .run(&db)
        .await
        .context("Failed to run migrations")?;

    let barrier = BarrierConfig::double_w_beam();
    tracing::info!(
        "Pricing {} ({} rm per set)",
        barrier.name,
        barrier.running_metres_per_set
    );

    let state = AppState {
        db,
        cache: AppCache::new(config.quote_cache_capacity, config.quote_cache_ttl),
        barrier: Arc::new(barrier),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
