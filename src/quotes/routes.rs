//! Quote API route handlers

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::pricing::responses::QuoteEvaluationResponse;
use crate::pricing::QuoteInputs;
use crate::AppState;

use super::document::QuoteDocument;
use super::models::{QuoteRecord, QuoteStatus};
use super::{queries, services};

const QUOTES_PER_PAGE: i64 = 25;

/// Request to save a quote
#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    pub customer_name: String,
    #[serde(default)]
    pub site_location: Option<String>,
    pub inputs: QuoteInputs,
}

/// Request to change a quote's status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: QuoteStatus,
}

/// Query parameters for quote listing
#[derive(Debug, Deserialize)]
pub struct QuoteListQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// Saved quote with its re-derived evaluation
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub site_location: Option<String>,
    pub status: String,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub total_with_tax: Option<Decimal>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<QuoteEvaluationResponse>,
}

impl QuoteResponse {
    fn summary(record: QuoteRecord) -> Self {
        Self {
            id: record.id,
            customer_name: record.customer_name,
            site_location: record.site_location,
            status: record.status,
            total_with_tax: record.total_with_tax,
            created_at: record.created_at,
            updated_at: record.updated_at,
            evaluation: None,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/quotes", get(list).post(create))
        .route("/api/quotes/:id", get(detail))
        .route("/api/quotes/:id/status", patch(update_status))
        .route("/api/quotes/:id/document", get(document))
}

async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateQuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let (record, evaluation) = services::create_quote(
        &state.db,
        &state.cache,
        &state.barrier,
        &req.customer_name,
        req.site_location.as_deref(),
        &req.inputs,
    )
    .await?;

    let mut response = QuoteResponse::summary(record);
    response.evaluation = Some(evaluation.into());
    Ok(Json(response))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<QuoteListQuery>,
) -> Result<Json<Vec<QuoteResponse>>> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<QuoteStatus>)
        .transpose()
        .map_err(AppError::BadRequest)?;
    let offset = (query.page.max(1) - 1)
        .checked_mul(QUOTES_PER_PAGE)
        .ok_or_else(|| AppError::BadRequest(format!("page {} is out of range", query.page)))?;

    let quotes = queries::list_quotes(&state.db, status, QUOTES_PER_PAGE, offset).await?;
    Ok(Json(quotes.into_iter().map(QuoteResponse::summary).collect()))
}

async fn detail(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuoteResponse>> {
    let record = services::get_quote(&state.db, &state.cache, id).await?;
    let (_, evaluation) = services::evaluate_record(&record, &state.barrier)?;

    let mut response = QuoteResponse::summary(record);
    response.evaluation = Some(evaluation.into());
    Ok(Json(response))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<QuoteResponse>> {
    let record = services::update_status(&state.db, &state.cache, id, req.status).await?;
    Ok(Json(QuoteResponse::summary(record)))
}

async fn document(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuoteDocument>> {
    let document = services::quote_document(&state.db, &state.cache, &state.barrier, id).await?;
    Ok(Json(document))
}
