//! Database models for saved quotes.
//!
//! The input snapshot and its evaluation are stored as opaque JSON; only the
//! fields the CRM filters on get their own columns.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::QuoteInputs;

/// Commercial status of a quote in the CRM pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Negotiation,
    Won,
    Lost,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "draft",
            QuoteStatus::Sent => "sent",
            QuoteStatus::Negotiation => "negotiation",
            QuoteStatus::Won => "won",
            QuoteStatus::Lost => "lost",
        }
    }
}

impl std::str::FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(QuoteStatus::Draft),
            "sent" => Ok(QuoteStatus::Sent),
            "negotiation" => Ok(QuoteStatus::Negotiation),
            "won" => Ok(QuoteStatus::Won),
            "lost" => Ok(QuoteStatus::Lost),
            other => Err(format!("unknown quote status '{}'", other)),
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quote from mbcb_quotes
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteRecord {
    pub id: Uuid,
    pub customer_name: String,
    pub site_location: Option<String>,
    pub status: String,
    pub inputs: serde_json::Value,
    pub evaluation: serde_json::Value,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub total_with_tax: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuoteRecord {
    /// Parsed status; `None` if the column holds an unknown value
    pub fn status(&self) -> Option<QuoteStatus> {
        self.status.parse().ok()
    }

    /// Decode the stored input snapshot
    pub fn quote_inputs(&self) -> Result<QuoteInputs, serde_json::Error> {
        serde_json::from_value(self.inputs.clone())
    }
}
