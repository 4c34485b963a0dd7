//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{
    AssemblyWeights, ComponentKind, ComponentSelections, ComponentWeightResult, CostBasis,
    CostBreakdown, FastenerMode, TaxJurisdiction, TaxResult,
};
use super::services::{PricingError, QuoteEvaluation};
use super::workflow::QuoteStage;

pub const CURRENCY: &str = "INR";

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn inr(amount: Decimal) -> Self {
        Self {
            amount,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Response for component weight calculation
#[derive(Debug, Serialize)]
pub struct ComponentWeightResponse {
    pub kind: ComponentKind,
    #[serde(with = "rust_decimal::serde::str")]
    pub black_material_weight_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub zinc_weight_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_weight_kg: Decimal,
}

impl ComponentWeightResponse {
    pub fn new(kind: ComponentKind, result: ComponentWeightResult) -> Self {
        Self {
            kind,
            black_material_weight_kg: result.black_material_weight_kg,
            zinc_weight_kg: result.zinc_weight_kg,
            total_weight_kg: result.total_weight_kg,
        }
    }
}

/// Response for fastener weight calculation
#[derive(Debug, Serialize)]
pub struct FastenerWeightResponse {
    pub mode: FastenerMode,
    #[serde(with = "rust_decimal::serde::str")]
    pub fastener_weight_kg: Decimal,
}

/// Response for assembly weight aggregation
#[derive(Debug, Serialize)]
pub struct AssemblyWeightsResponse {
    pub mode: FastenerMode,
    #[serde(with = "rust_decimal::serde::str")]
    pub fastener_weight_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_set_weight_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub weight_per_rm_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub black_weight_per_rm_kg: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub zinc_weight_per_rm_kg: Decimal,
}

impl From<AssemblyWeights> for AssemblyWeightsResponse {
    fn from(weights: AssemblyWeights) -> Self {
        Self {
            mode: weights.mode,
            fastener_weight_kg: weights.fastener_weight_kg,
            total_set_weight_kg: weights.total_set_weight_kg,
            weight_per_rm_kg: weights.weight_per_rm_kg,
            black_weight_per_rm_kg: weights.black_weight_per_rm_kg,
            zinc_weight_per_rm_kg: weights.zinc_weight_per_rm_kg,
        }
    }
}

/// Response for cost breakdown calculation
#[derive(Debug, Serialize)]
pub struct CostBreakdownResponse {
    pub basis: CostBasis,
    #[serde(with = "rust_decimal::serde::str")]
    pub basis_weight_kg: Decimal,
    pub material_cost: MoneyResponse,
    pub transport_cost: MoneyResponse,
    pub installation_cost: MoneyResponse,
    pub total_cost: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub quantity_rm: Option<Decimal>,
    pub final_total: Option<MoneyResponse>,
}

impl From<CostBreakdown> for CostBreakdownResponse {
    fn from(cost: CostBreakdown) -> Self {
        Self {
            basis: cost.basis,
            basis_weight_kg: cost.basis_weight_kg,
            material_cost: MoneyResponse::inr(cost.material_cost),
            transport_cost: MoneyResponse::inr(cost.transport_cost),
            installation_cost: MoneyResponse::inr(cost.installation_cost),
            total_cost: MoneyResponse::inr(cost.total_cost),
            quantity_rm: cost.quantity_rm,
            final_total: cost.final_total.map(MoneyResponse::inr),
        }
    }
}

/// Response for GST calculation
#[derive(Debug, Serialize)]
pub struct TaxResponse {
    pub jurisdiction: TaxJurisdiction,
    pub taxable_amount: MoneyResponse,
    pub sgst: MoneyResponse,
    pub cgst: MoneyResponse,
    pub igst: MoneyResponse,
    pub total_tax: MoneyResponse,
    pub total_with_tax: MoneyResponse,
}

impl From<TaxResult> for TaxResponse {
    fn from(tax: TaxResult) -> Self {
        Self {
            jurisdiction: tax.jurisdiction,
            taxable_amount: MoneyResponse::inr(tax.taxable_amount),
            sgst: MoneyResponse::inr(tax.sgst),
            cgst: MoneyResponse::inr(tax.cgst),
            igst: MoneyResponse::inr(tax.igst),
            total_tax: MoneyResponse::inr(tax.total_tax),
            total_with_tax: MoneyResponse::inr(tax.total_with_tax),
        }
    }
}

/// A staged-completion issue reported alongside a partial evaluation
#[derive(Debug, Serialize)]
pub struct PricingIssueResponse {
    #[serde(flatten)]
    pub error: PricingError,
    pub message: String,
}

impl From<PricingError> for PricingIssueResponse {
    fn from(error: PricingError) -> Self {
        Self {
            message: error.to_string(),
            error,
        }
    }
}

/// Response for a full quote evaluation
#[derive(Debug, Serialize)]
pub struct QuoteEvaluationResponse {
    pub stage: QuoteStage,
    pub complete: bool,
    pub components: ComponentSelections,
    pub assembly: Option<AssemblyWeightsResponse>,
    pub cost: Option<CostBreakdownResponse>,
    pub tax: Option<TaxResponse>,
    pub issues: Vec<PricingIssueResponse>,
}

impl From<QuoteEvaluation> for QuoteEvaluationResponse {
    fn from(evaluation: QuoteEvaluation) -> Self {
        Self {
            stage: evaluation.stage,
            complete: evaluation.is_complete(),
            components: evaluation.components,
            assembly: evaluation.assembly.map(Into::into),
            cost: evaluation.cost.map(Into::into),
            tax: evaluation.tax.map(Into::into),
            issues: evaluation.issues.into_iter().map(Into::into).collect(),
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
