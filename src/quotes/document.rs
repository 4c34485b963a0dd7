//! Quotation document payload handed to the PDF renderer.
//!
//! Amounts are rounded to paise here, and only here; the engine's own
//! values stay unrounded.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::pricing::models::{BarrierConfig, ComponentKind, CostBasis, FastenerSelection};
use crate::pricing::responses::MoneyResponse;
use crate::pricing::{round_money, QuoteEvaluation, QuoteInputs};

use super::models::QuoteRecord;

const MONEY_PLACES: u32 = 2;
const WEIGHT_PLACES: u32 = 3;

#[derive(Debug, Clone, Serialize)]
pub struct DocumentLine {
    pub description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    pub unit: &'static str,
    pub rate: MoneyResponse,
    pub amount: MoneyResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteDocument {
    pub quote_id: Uuid,
    pub customer_name: String,
    pub site_location: Option<String>,
    pub status: String,
    pub specifications: Vec<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub weight_per_rm_kg: Decimal,
    pub line_items: Vec<DocumentLine>,
    pub subtotal: MoneyResponse,
    pub sgst: MoneyResponse,
    pub cgst: MoneyResponse,
    pub igst: MoneyResponse,
    pub total_with_tax: MoneyResponse,
}

fn money(amount: Decimal) -> MoneyResponse {
    MoneyResponse::inr(round_money(amount, MONEY_PLACES))
}

fn describe_component(kind: ComponentKind, inputs: &QuoteInputs, multiplier: u32) -> Option<String> {
    let spec = &inputs.components.get(kind).spec;
    let thickness = spec.thickness_mm?;
    let coating = spec.coating_gsm?;
    let length = match (kind.requires_length(), spec.length_mm) {
        (true, Some(length)) => format!(", {} mm long", length.normalize()),
        _ => String::new(),
    };
    Some(format!(
        "{} {} mm thick{}, {} GSM zinc coating (x{} per set)",
        kind.label(),
        thickness.normalize(),
        length,
        coating.normalize(),
        multiplier
    ))
}

/// Build the document for a complete evaluation; `None` while any issue is open
pub fn build_document(
    record: &QuoteRecord,
    inputs: &QuoteInputs,
    evaluation: &QuoteEvaluation,
    config: &BarrierConfig,
) -> Option<QuoteDocument> {
    if !evaluation.is_complete() {
        return None;
    }
    let assembly = evaluation.assembly?;
    let cost = evaluation.cost?;
    let tax = evaluation.tax?;

    let mut specifications = Vec::new();
    match inputs.fasteners {
        FastenerSelection::Default => {
            for kind in ComponentKind::ALL {
                if evaluation.components.get(kind).contributing_weight().is_some() {
                    specifications.extend(describe_component(kind, inputs, config.multiplier(kind)));
                }
            }
            specifications.push(format!(
                "Fasteners: standard set, {} kg per set",
                config.default_fastener_weight_kg.normalize()
            ));
        }
        FastenerSelection::Manual {
            hex_bolt_qty,
            button_bolt_qty,
        } => {
            specifications.push(format!("Hex bolts: {} nos", hex_bolt_qty));
            specifications.push(format!("Button bolts: {} nos", button_bolt_qty));
        }
    }

    let (quantity, unit) = match cost.basis {
        CostBasis::PerRunningMetre => (cost.quantity_rm.unwrap_or(Decimal::ONE), "rm"),
        CostBasis::PerFastenerWeight => (Decimal::ONE, "lot"),
    };

    let mut line_items = vec![DocumentLine {
        description: "Supply of galvanized crash barrier material".to_string(),
        quantity,
        unit,
        rate: money(cost.material_cost),
        amount: money(cost.material_cost.checked_mul(quantity)?),
    }];
    if cost.transport_cost > Decimal::ZERO {
        line_items.push(DocumentLine {
            description: "Transportation".to_string(),
            quantity,
            unit,
            rate: money(cost.transport_cost),
            amount: money(cost.transport_cost.checked_mul(quantity)?),
        });
    }
    if cost.installation_cost > Decimal::ZERO {
        line_items.push(DocumentLine {
            description: "Installation".to_string(),
            quantity,
            unit,
            rate: money(cost.installation_cost),
            amount: money(cost.installation_cost.checked_mul(quantity)?),
        });
    }

    Some(QuoteDocument {
        quote_id: record.id,
        customer_name: record.customer_name.clone(),
        site_location: record.site_location.clone(),
        status: record.status.clone(),
        specifications,
        weight_per_rm_kg: round_money(assembly.weight_per_rm_kg, WEIGHT_PLACES),
        line_items,
        subtotal: money(tax.taxable_amount),
        sgst: money(tax.sgst),
        cgst: money(tax.cgst),
        igst: money(tax.igst),
        total_with_tax: money(tax.total_with_tax),
    })
}
