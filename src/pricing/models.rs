//! Value types for the crash-barrier pricing pipeline.
//!
//! Every type here is an immutable snapshot. Derived values are recomputed
//! from inputs on each call and never updated in place.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Barrier component with its own steel-profile weight formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    WBeam,
    Post,
    Spacer,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [ComponentKind::WBeam, ComponentKind::Post, ComponentKind::Spacer];

    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::WBeam => "W-Beam",
            ComponentKind::Post => "Post",
            ComponentKind::Spacer => "Spacer",
        }
    }

    /// W-Beam panels have a fixed length, so only posts and spacers take one
    pub fn requires_length(&self) -> bool {
        !matches!(self, ComponentKind::WBeam)
    }
}

/// Specification of a single component as entered by the user.
///
/// Fields stay optional because the form is filled in stages; a weight can
/// only be computed once every field the kind needs is present and positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub thickness_mm: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub length_mm: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub coating_gsm: Option<Decimal>,
}

impl ComponentSpec {
    pub fn new(thickness_mm: Decimal, length_mm: Option<Decimal>, coating_gsm: Decimal) -> Self {
        Self {
            thickness_mm: Some(thickness_mm),
            length_mm,
            coating_gsm: Some(coating_gsm),
        }
    }
}

/// Weight of one component piece, split into steel and zinc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentWeightResult {
    pub black_material_weight_kg: Decimal,
    pub zinc_weight_kg: Decimal,
    pub total_weight_kg: Decimal,
}

impl ComponentWeightResult {
    pub fn new(black_material_weight_kg: Decimal, zinc_weight_kg: Decimal) -> Self {
        Self {
            black_material_weight_kg,
            zinc_weight_kg,
            total_weight_kg: black_material_weight_kg + zinc_weight_kg,
        }
    }
}

/// A component's computed weight (if any) and whether it is part of the quote
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSelection {
    pub weight: Option<ComponentWeightResult>,
    pub included: bool,
}

impl ComponentSelection {
    pub fn included(weight: ComponentWeightResult) -> Self {
        Self {
            weight: Some(weight),
            included: true,
        }
    }

    /// Weight that contributes to the set, zero when excluded or not computed
    pub fn contributing_weight(&self) -> Option<ComponentWeightResult> {
        if self.included {
            self.weight
        } else {
            None
        }
    }
}

/// Selections for every component of one barrier set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSelections {
    #[serde(default)]
    pub w_beam: ComponentSelection,
    #[serde(default)]
    pub post: ComponentSelection,
    #[serde(default)]
    pub spacer: ComponentSelection,
}

impl ComponentSelections {
    pub fn get(&self, kind: ComponentKind) -> &ComponentSelection {
        match kind {
            ComponentKind::WBeam => &self.w_beam,
            ComponentKind::Post => &self.post,
            ComponentKind::Spacer => &self.spacer,
        }
    }

    pub fn get_mut(&mut self, kind: ComponentKind) -> &mut ComponentSelection {
        match kind {
            ComponentKind::WBeam => &mut self.w_beam,
            ComponentKind::Post => &mut self.post,
            ComponentKind::Spacer => &mut self.spacer,
        }
    }
}

/// How fastener weight enters the quote.
///
/// `Manual` prices loose bolts only: component selection is disabled while
/// it is active, so the two pricing modes can never be mixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FastenerSelection {
    #[default]
    Default,
    Manual { hex_bolt_qty: u32, button_bolt_qty: u32 },
}

impl FastenerSelection {
    pub fn is_manual(&self) -> bool {
        matches!(self, FastenerSelection::Manual { .. })
    }

    pub fn mode(&self) -> FastenerMode {
        match self {
            FastenerSelection::Default => FastenerMode::Default,
            FastenerSelection::Manual { .. } => FastenerMode::Manual,
        }
    }
}

/// Pricing mode implied by a `FastenerSelection`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FastenerMode {
    Default,
    Manual,
}

/// Assembly constants of a barrier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarrierConfig {
    pub name: &'static str,
    pub w_beam_multiplier: u32,
    pub post_multiplier: u32,
    pub spacer_multiplier: u32,
    pub default_fastener_weight_kg: Decimal,
    pub running_metres_per_set: Decimal,
}

impl BarrierConfig {
    /// Double W-beam: two rails, two posts, four spacers per 4 m bay
    pub fn double_w_beam() -> Self {
        Self {
            name: "double_w_beam",
            w_beam_multiplier: 2,
            post_multiplier: 2,
            spacer_multiplier: 4,
            default_fastener_weight_kg: dec!(4),
            running_metres_per_set: dec!(4),
        }
    }

    pub fn multiplier(&self, kind: ComponentKind) -> u32 {
        match kind {
            ComponentKind::WBeam => self.w_beam_multiplier,
            ComponentKind::Post => self.post_multiplier,
            ComponentKind::Spacer => self.spacer_multiplier,
        }
    }
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self::double_w_beam()
    }
}

/// Aggregate weights of one barrier set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyWeights {
    pub mode: FastenerMode,
    pub fastener_weight_kg: Decimal,
    pub total_set_weight_kg: Decimal,
    pub weight_per_rm_kg: Decimal,
    pub black_weight_per_rm_kg: Decimal,
    pub zinc_weight_per_rm_kg: Decimal,
}

impl AssemblyWeights {
    /// Weight that rates are multiplied against: per running metre normally,
    /// the absolute fastener weight in manual mode
    pub fn cost_basis_weight_kg(&self) -> Decimal {
        match self.mode {
            FastenerMode::Default => self.weight_per_rm_kg,
            FastenerMode::Manual => self.total_set_weight_kg,
        }
    }
}

/// Commercial inputs entered after the weights are known
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommercialInputs {
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub rate_per_kg: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub transport_cost_per_kg: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub installation_cost_per_rm: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub quantity_rm: Option<Decimal>,
    #[serde(default)]
    pub include_transport: bool,
    #[serde(default)]
    pub include_installation: bool,
}

/// Unit the cost lines of a `CostBreakdown` are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBasis {
    PerRunningMetre,
    PerFastenerWeight,
}

/// Landed cost derived from a basis weight and the commercial inputs.
///
/// Values are unrounded; formatting belongs to whoever displays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub basis: CostBasis,
    pub basis_weight_kg: Decimal,
    pub material_cost: Decimal,
    pub transport_cost: Decimal,
    pub installation_cost: Decimal,
    pub total_cost: Decimal,
    pub quantity_rm: Option<Decimal>,
    pub final_total: Option<Decimal>,
}

/// Whether supplier and customer are in the same state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxJurisdiction {
    #[default]
    IntraState,
    InterState,
}

impl TaxJurisdiction {
    pub fn from_intra_state(is_intra_state: bool) -> Self {
        if is_intra_state {
            TaxJurisdiction::IntraState
        } else {
            TaxJurisdiction::InterState
        }
    }
}

/// GST split for a final total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub jurisdiction: TaxJurisdiction,
    pub taxable_amount: Decimal,
    pub sgst: Decimal,
    pub cgst: Decimal,
    pub igst: Decimal,
    pub total_tax: Decimal,
    pub total_with_tax: Decimal,
}
