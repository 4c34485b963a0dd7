//! MBCB quotation pricing service.
//!
//! Weight, cost and GST calculation for double W-beam crash barriers, plus
//! storage and status tracking of saved quotes.

use axum::{extract::State, routing::get, Json, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;
pub mod quotes;

use cache::{AppCache, CacheStats};
use pricing::BarrierConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub barrier: Arc<BarrierConfig>,
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(pricing::router())
        .merge(quotes::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    /// State whose pool never connects; only for handlers that stay off the database
    pub fn test_state() -> AppState {
        AppState {
            db: PgPoolOptions::new()
                .connect_lazy("postgres://localhost/mbcb_test")
                .unwrap(),
            cache: AppCache::default(),
            barrier: Arc::new(BarrierConfig::double_w_beam()),
        }
    }
}
