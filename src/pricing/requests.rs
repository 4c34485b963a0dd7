//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::{
    CommercialInputs, ComponentKind, ComponentSelections, ComponentSpec, FastenerMode,
    FastenerSelection,
};

/// Request to calculate one component's weight
#[derive(Debug, Deserialize)]
pub struct ComponentWeightRequest {
    pub kind: ComponentKind,
    #[serde(default)]
    pub spec: ComponentSpec,
}

/// Request to calculate fastener weight
#[derive(Debug, Deserialize)]
pub struct FastenerWeightRequest {
    #[serde(default)]
    pub fasteners: FastenerSelection,
}

/// Request to aggregate set weights
#[derive(Debug, Deserialize)]
pub struct AssemblyWeightsRequest {
    #[serde(default)]
    pub components: ComponentSelections,
    #[serde(default)]
    pub fasteners: FastenerSelection,
}

/// Request to calculate a cost breakdown
#[derive(Debug, Deserialize)]
pub struct CostBreakdownRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub basis_weight_kg: Decimal,
    #[serde(default)]
    pub commercial: CommercialInputs,
    #[serde(default = "default_mode")]
    pub mode: FastenerMode,
}

fn default_mode() -> FastenerMode {
    FastenerMode::Default
}

/// Request to calculate GST
#[derive(Debug, Deserialize)]
pub struct TaxRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub final_total: Decimal,
    #[serde(default = "default_intra_state")]
    pub is_intra_state: bool,
}

fn default_intra_state() -> bool {
    true
}
