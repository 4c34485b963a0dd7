//! Core pricing calculation functions.
//!
//! Pure functions for weight, cost and tax math - no database access.
//! Every function takes a full input snapshot and returns a full result, so
//! repeated calls with the same inputs produce identical values.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use super::models::{
    AssemblyWeights, BarrierConfig, CommercialInputs, ComponentKind, ComponentSelections,
    ComponentSpec, ComponentWeightResult, CostBasis, CostBreakdown, FastenerMode,
    FastenerSelection, TaxJurisdiction, TaxResult,
};
use super::profiles;
use super::services::PricingError;

/// Unit weight of a hex bolt set (kg)
pub const HEX_BOLT_WEIGHT_KG: Decimal = dec!(0.135);
/// Unit weight of a button bolt set (kg)
pub const BUTTON_BOLT_WEIGHT_KG: Decimal = dec!(0.145);

pub const SGST_RATE: Decimal = dec!(0.09);
pub const CGST_RATE: Decimal = dec!(0.09);
pub const IGST_RATE: Decimal = dec!(0.18);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// The engine never rounds its own results; this is for building display
/// payloads such as quote documents.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use mbcb_quote::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_mul(b).ok_or(PricingError::ValueOutOfRange)
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_add(b).ok_or(PricingError::ValueOutOfRange)
}

fn require_positive(
    value: Option<Decimal>,
    component: ComponentKind,
    field: &'static str,
) -> Result<Decimal, PricingError> {
    match value {
        Some(v) if v > Decimal::ZERO => Ok(v),
        _ => Err(PricingError::IncompleteSpecification { component, field }),
    }
}

/// The positive material rate, or `MissingRate`
pub fn require_rate(commercial: &CommercialInputs) -> Result<Decimal, PricingError> {
    match commercial.rate_per_kg {
        Some(rate) if rate > Decimal::ZERO => Ok(rate),
        _ => Err(PricingError::MissingRate),
    }
}

/// Calculate black steel and zinc weight of one component piece.
///
/// Thickness and coating are always required; length is required for posts
/// and spacers and ignored for W-beam panels, which come in one length.
pub fn compute_component_weight(
    kind: ComponentKind,
    spec: &ComponentSpec,
) -> Result<ComponentWeightResult, PricingError> {
    let geometry = profiles::geometry(kind);

    let thickness_mm = require_positive(spec.thickness_mm, kind, "thickness_mm")?;
    let length_mm = match geometry.fixed_length_mm {
        Some(fixed) => fixed,
        None => require_positive(spec.length_mm, kind, "length_mm")?,
    };
    let coating_gsm = require_positive(spec.coating_gsm, kind, "coating_gsm")?;

    let black = geometry
        .black_weight_kg(length_mm, thickness_mm)
        .ok_or(PricingError::ValueOutOfRange)?;
    let zinc = geometry
        .zinc_weight_kg(length_mm, coating_gsm)
        .ok_or(PricingError::ValueOutOfRange)?;

    Ok(ComponentWeightResult {
        black_material_weight_kg: black,
        zinc_weight_kg: zinc,
        total_weight_kg: add(black, zinc)?,
    })
}

/// Calculate the fastener weight of one set.
///
/// Default mode uses the configuration's bundled fastener weight; manual
/// mode sums the bolt counts at their unit weights.
pub fn compute_fastener_weight(selection: &FastenerSelection, config: &BarrierConfig) -> Decimal {
    match *selection {
        FastenerSelection::Default => config.default_fastener_weight_kg,
        FastenerSelection::Manual {
            hex_bolt_qty,
            button_bolt_qty,
        } => {
            Decimal::from(hex_bolt_qty) * HEX_BOLT_WEIGHT_KG
                + Decimal::from(button_bolt_qty) * BUTTON_BOLT_WEIGHT_KG
        }
    }
}

/// Aggregate component and fastener weights into set and per-metre weights.
///
/// In manual fastener mode components are ignored whatever their inclusion
/// flags say; only the bolts are priced.
pub fn compute_assembly_weights(
    components: &ComponentSelections,
    config: &BarrierConfig,
    fasteners: &FastenerSelection,
) -> Result<AssemblyWeights, PricingError> {
    let fastener_weight_kg = compute_fastener_weight(fasteners, config);

    let mut component_total = Decimal::ZERO;
    let mut black_total = Decimal::ZERO;
    let mut zinc_total = Decimal::ZERO;

    if !fasteners.is_manual() {
        for kind in ComponentKind::ALL {
            if let Some(weight) = components.get(kind).contributing_weight() {
                let multiplier = Decimal::from(config.multiplier(kind));
                component_total = add(component_total, mul(weight.total_weight_kg, multiplier)?)?;
                black_total = add(black_total, mul(weight.black_material_weight_kg, multiplier)?)?;
                zinc_total = add(zinc_total, mul(weight.zinc_weight_kg, multiplier)?)?;
            }
        }
    }

    let total_set_weight_kg = add(component_total, fastener_weight_kg)?;
    let per_rm = |kg: Decimal| kg / config.running_metres_per_set;

    Ok(AssemblyWeights {
        mode: fasteners.mode(),
        fastener_weight_kg,
        total_set_weight_kg,
        weight_per_rm_kg: per_rm(total_set_weight_kg),
        black_weight_per_rm_kg: per_rm(black_total),
        zinc_weight_per_rm_kg: per_rm(zinc_total),
    })
}

/// Calculate material, transport and installation cost.
///
/// Default mode prices per running metre and only produces a final total
/// once a positive quantity is known. Manual mode prices the absolute
/// fastener weight and has no quantity step. Installation is a per-metre
/// charge and does not apply to loose bolts.
pub fn compute_cost_breakdown(
    basis_weight_kg: Decimal,
    commercial: &CommercialInputs,
    mode: FastenerMode,
) -> Result<CostBreakdown, PricingError> {
    let rate_per_kg = require_rate(commercial)?;

    let material_cost = mul(basis_weight_kg, rate_per_kg)?;

    let transport_cost = match commercial.transport_cost_per_kg {
        Some(rate) if commercial.include_transport => mul(basis_weight_kg, rate)?,
        _ => Decimal::ZERO,
    };

    let installation_cost = match (mode, commercial.installation_cost_per_rm) {
        (FastenerMode::Default, Some(rate)) if commercial.include_installation => rate,
        _ => Decimal::ZERO,
    };

    let total_cost = add(add(material_cost, transport_cost)?, installation_cost)?;

    let (basis, quantity_rm, final_total) = match mode {
        FastenerMode::Default => {
            let quantity = commercial.quantity_rm.filter(|q| *q > Decimal::ZERO);
            (
                CostBasis::PerRunningMetre,
                quantity,
                quantity.map(|q| mul(total_cost, q)).transpose()?,
            )
        }
        FastenerMode::Manual => (CostBasis::PerFastenerWeight, None, Some(total_cost)),
    };

    Ok(CostBreakdown {
        basis,
        basis_weight_kg,
        material_cost,
        transport_cost,
        installation_cost,
        total_cost,
        quantity_rm,
        final_total,
    })
}

/// Calculate GST on a final total.
///
/// Returns `None` for a non-positive base: there is nothing to tax yet.
pub fn compute_tax(
    final_total: Decimal,
    jurisdiction: TaxJurisdiction,
) -> Result<Option<TaxResult>, PricingError> {
    if final_total <= Decimal::ZERO {
        return Ok(None);
    }

    let (sgst, cgst, igst) = match jurisdiction {
        TaxJurisdiction::IntraState => (
            mul(final_total, SGST_RATE)?,
            mul(final_total, CGST_RATE)?,
            Decimal::ZERO,
        ),
        TaxJurisdiction::InterState => (Decimal::ZERO, Decimal::ZERO, mul(final_total, IGST_RATE)?),
    };
    let total_tax = add(add(sgst, cgst)?, igst)?;

    Ok(Some(TaxResult {
        jurisdiction,
        taxable_amount: final_total,
        sgst,
        cgst,
        igst,
        total_tax,
        total_with_tax: add(final_total, total_tax)?,
    }))
}
