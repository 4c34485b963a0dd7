//! Quote service functions with database access.
//!
//! Reads go through the cache first. Status updates are applied to the
//! cache optimistically and reconciled with the database result.

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::{AppError, Result};
use crate::pricing::models::BarrierConfig;
use crate::pricing::{evaluate_quote, QuoteEvaluation, QuoteInputs};

use super::document::{build_document, QuoteDocument};
use super::models::{QuoteRecord, QuoteStatus};
use super::queries::{self, NewQuote};

/// Evaluate and save a new quote as a draft
pub async fn create_quote(
    pool: &PgPool,
    cache: &AppCache,
    config: &BarrierConfig,
    customer_name: &str,
    site_location: Option<&str>,
    inputs: &QuoteInputs,
) -> Result<(QuoteRecord, QuoteEvaluation)> {
    if customer_name.trim().is_empty() {
        return Err(AppError::BadRequest("customer_name must not be empty".to_string()));
    }

    let evaluation = evaluate_quote(inputs, config);
    let to_json = |value: serde_json::Result<serde_json::Value>| {
        value.map_err(|e| AppError::Internal(format!("Failed to encode quote: {}", e)))
    };

    let record = queries::insert_quote(
        pool,
        NewQuote {
            customer_name: customer_name.trim(),
            site_location,
            status: QuoteStatus::Draft,
            inputs: to_json(serde_json::to_value(inputs))?,
            evaluation: to_json(serde_json::to_value(&evaluation))?,
            total_with_tax: evaluation
                .tax
                .filter(|_| evaluation.is_complete())
                .map(|t| t.total_with_tax),
        },
    )
    .await?;

    info!("Created quote {} for {}", record.id, record.customer_name);
    cache.insert_quote(record.clone()).await;

    Ok((record, evaluation))
}

/// Fetch a quote, preferring the cached copy
pub async fn get_quote(pool: &PgPool, cache: &AppCache, id: Uuid) -> Result<QuoteRecord> {
    if let Some(cached) = cache.get_quote(id).await {
        debug!("Cache HIT for quote: {}", id);
        return Ok(cached.record.clone());
    }

    debug!("Cache MISS for quote: {}", id);
    let record = queries::get_quote(pool, id).await?;
    cache.insert_quote(record.clone()).await;
    Ok(record)
}

/// Change a quote's status.
///
/// The cached copy shows the new status immediately. If the database write
/// fails the cached status is rolled back and the error returned.
pub async fn update_status(
    pool: &PgPool,
    cache: &AppCache,
    id: Uuid,
    status: QuoteStatus,
) -> Result<QuoteRecord> {
    let applied = cache.apply_optimistic_status(id, status).await;

    match queries::update_quote_status(pool, id, status).await {
        Ok(record) => {
            info!("Quote {} status set to {}", id, status);
            cache.confirm_quote(record.clone()).await;
            Ok(record)
        }
        Err(e) => {
            if applied {
                cache.rollback_status(id).await;
            }
            if matches!(e, AppError::NotFound) {
                cache.quotes.invalidate(&id).await;
            }
            Err(e)
        }
    }
}

/// Re-evaluate a stored quote from its inputs
pub fn evaluate_record(record: &QuoteRecord, config: &BarrierConfig) -> Result<(QuoteInputs, QuoteEvaluation)> {
    let inputs = record
        .quote_inputs()
        .map_err(|e| AppError::Internal(format!("Stored inputs of quote {} are invalid: {}", record.id, e)))?;
    let evaluation = evaluate_quote(&inputs, config);
    Ok((inputs, evaluation))
}

/// Build the document payload for a stored quote
pub async fn quote_document(
    pool: &PgPool,
    cache: &AppCache,
    config: &BarrierConfig,
    id: Uuid,
) -> Result<QuoteDocument> {
    let record = get_quote(pool, cache, id).await?;
    let (inputs, evaluation) = evaluate_record(&record, config)?;

    build_document(&record, &inputs, &evaluation, config).ok_or_else(|| {
        AppError::BadRequest(format!("Quote {} is not complete ({:?})", id, evaluation.stage))
    })
}
