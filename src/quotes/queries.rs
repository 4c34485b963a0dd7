//! Database queries for saved quotes.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::models::{QuoteRecord, QuoteStatus};

const QUOTE_COLUMNS: &str = r#"
    id,
    customer_name,
    site_location,
    status,
    inputs,
    evaluation,
    total_with_tax,
    created_at,
    updated_at
"#;

/// Fields of a new quote row
pub struct NewQuote<'a> {
    pub customer_name: &'a str,
    pub site_location: Option<&'a str>,
    pub status: QuoteStatus,
    pub inputs: serde_json::Value,
    pub evaluation: serde_json::Value,
    pub total_with_tax: Option<Decimal>,
}

/// Insert a quote and return the stored row
pub async fn insert_quote(pool: &PgPool, quote: NewQuote<'_>) -> Result<QuoteRecord> {
    let sql = format!(
        r#"
        INSERT INTO mbcb_quotes
            (id, customer_name, site_location, status, inputs, evaluation, total_with_tax)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {}
        "#,
        QUOTE_COLUMNS
    );

    let record = sqlx::query_as::<_, QuoteRecord>(&sql)
        .bind(Uuid::new_v4())
        .bind(quote.customer_name)
        .bind(quote.site_location)
        .bind(quote.status.as_str())
        .bind(quote.inputs)
        .bind(quote.evaluation)
        .bind(quote.total_with_tax)
        .fetch_one(pool)
        .await?;

    Ok(record)
}

/// Get a quote by id
pub async fn get_quote(pool: &PgPool, id: Uuid) -> Result<QuoteRecord> {
    let sql = format!("SELECT {} FROM mbcb_quotes WHERE id = $1", QUOTE_COLUMNS);

    sqlx::query_as::<_, QuoteRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

/// List quotes, newest first, optionally filtered by status
pub async fn list_quotes(
    pool: &PgPool,
    status: Option<QuoteStatus>,
    limit: i64,
    offset: i64,
) -> Result<Vec<QuoteRecord>> {
    let sql = format!(
        r#"
        SELECT {}
        FROM mbcb_quotes
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
        QUOTE_COLUMNS
    );

    let quotes = sqlx::query_as::<_, QuoteRecord>(&sql)
        .bind(status.map(|s| s.as_str()))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(quotes)
}

/// Set a quote's status and return the updated row
pub async fn update_quote_status(pool: &PgPool, id: Uuid, status: QuoteStatus) -> Result<QuoteRecord> {
    let sql = format!(
        r#"
        UPDATE mbcb_quotes
        SET status = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        QUOTE_COLUMNS
    );

    sqlx::query_as::<_, QuoteRecord>(&sql)
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}
