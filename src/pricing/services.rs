//! Quote evaluation service.
//!
//! Runs the whole pricing pipeline on one input snapshot. Nothing is carried
//! over between calls: the host re-evaluates on every input change and gets
//! back everything that can be computed so far, plus what is still missing.

use serde::{Deserialize, Serialize};

use super::calculators::{
    compute_assembly_weights, compute_component_weight, compute_cost_breakdown, compute_tax,
    require_rate,
};
use super::models::{
    AssemblyWeights, BarrierConfig, CommercialInputs, ComponentKind, ComponentSelection,
    ComponentSelections, ComponentSpec, CostBreakdown, FastenerSelection, TaxJurisdiction,
    TaxResult,
};
use super::workflow::{QuoteProgress, QuoteStage};

/// Pricing calculation error types
///
/// All are precondition failures: the caller asks the user to correct the
/// input and evaluates again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error_type", rename_all = "snake_case")]
pub enum PricingError {
    IncompleteSpecification {
        component: ComponentKind,
        field: &'static str,
    },
    MissingRate,
    /// A product or sum exceeded the representable decimal range
    ValueOutOfRange,
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::IncompleteSpecification { component, field } => {
                write!(f, "{} specification is incomplete: {} is required", component.label(), field)
            }
            PricingError::MissingRate => write!(f, "A positive rate per kg is required"),
            PricingError::ValueOutOfRange => write!(f, "Inputs are too large to price"),
        }
    }
}

impl std::error::Error for PricingError {}

impl PricingError {
    /// The stage whose inputs must be corrected, if one can be named
    pub fn reopens(&self) -> Option<QuoteStage> {
        match self {
            PricingError::IncompleteSpecification { .. } => Some(QuoteStage::SpecifyingComponents),
            PricingError::MissingRate => Some(QuoteStage::SpecifyingCommercials),
            PricingError::ValueOutOfRange => None,
        }
    }
}

/// One component as entered in the quote form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentInput {
    #[serde(default)]
    pub spec: ComponentSpec,
    #[serde(default)]
    pub included: bool,
}

/// Component inputs for every kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentInputs {
    #[serde(default)]
    pub w_beam: ComponentInput,
    #[serde(default)]
    pub post: ComponentInput,
    #[serde(default)]
    pub spacer: ComponentInput,
}

impl ComponentInputs {
    pub fn get(&self, kind: ComponentKind) -> &ComponentInput {
        match kind {
            ComponentKind::WBeam => &self.w_beam,
            ComponentKind::Post => &self.post,
            ComponentKind::Spacer => &self.spacer,
        }
    }
}

/// Complete input snapshot of a quote in progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteInputs {
    #[serde(default)]
    pub components: ComponentInputs,
    #[serde(default)]
    pub fasteners: FastenerSelection,
    #[serde(default)]
    pub commercial: CommercialInputs,
    #[serde(default)]
    pub jurisdiction: TaxJurisdiction,
    #[serde(default)]
    pub progress: QuoteProgress,
}

/// Everything derivable from a `QuoteInputs` snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteEvaluation {
    pub components: ComponentSelections,
    pub assembly: Option<AssemblyWeights>,
    pub cost: Option<CostBreakdown>,
    pub tax: Option<TaxResult>,
    pub stage: QuoteStage,
    pub issues: Vec<PricingError>,
}

impl QuoteEvaluation {
    /// Ready to be priced on a document: no open issues and tax is known
    pub fn is_complete(&self) -> bool {
        self.stage == QuoteStage::Complete
    }
}

fn record_issue<T>(result: Result<T, PricingError>, issues: &mut Vec<PricingError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            issues.push(e);
            None
        }
    }
}

/// Evaluate a quote snapshot top to bottom.
///
/// Excluded components have no weight. An included component with an
/// incomplete spec, or a missing rate, is reported in `issues` and every
/// value that depends on it stays absent; this is the normal state of a
/// quote that is still being filled in. A stage with an open issue is
/// reopened even if it was confirmed, so only an issue-free snapshot with
/// a known tax reaches `Complete`.
pub fn evaluate_quote(inputs: &QuoteInputs, config: &BarrierConfig) -> QuoteEvaluation {
    let mut issues = Vec::new();
    let mut components = ComponentSelections::default();

    // Component selection is disabled while bolts are priced manually
    if !inputs.fasteners.is_manual() {
        for kind in ComponentKind::ALL {
            let input = inputs.components.get(kind);
            if !input.included {
                continue;
            }
            match compute_component_weight(kind, &input.spec) {
                Ok(weight) => *components.get_mut(kind) = ComponentSelection::included(weight),
                Err(e) => issues.push(e),
            }
        }
    }

    // A partly specified set has no assembly weight
    let assembly = if issues.is_empty() {
        record_issue(
            compute_assembly_weights(&components, config, &inputs.fasteners),
            &mut issues,
        )
    } else {
        None
    };

    let cost = match assembly {
        Some(assembly) => {
            let basis_weight_kg = assembly.cost_basis_weight_kg();
            record_issue(
                compute_cost_breakdown(basis_weight_kg, &inputs.commercial, assembly.mode),
                &mut issues,
            )
        }
        None => {
            if let Err(e) = require_rate(&inputs.commercial) {
                issues.push(e);
            }
            None
        }
    };

    let tax = match cost.and_then(|c| c.final_total) {
        Some(total) => record_issue(compute_tax(total, inputs.jurisdiction), &mut issues).flatten(),
        None => None,
    };

    let progress = issues
        .iter()
        .filter_map(PricingError::reopens)
        .fold(inputs.progress, QuoteProgress::edit);
    let stage = progress.stage(inputs.fasteners.mode(), tax.is_some() && issues.is_empty());

    tracing::debug!(
        stage = ?stage,
        issues = issues.len(),
        total_set_weight_kg = ?assembly.map(|a| a.total_set_weight_kg),
        "Evaluated quote"
    );

    QuoteEvaluation {
        components,
        assembly,
        cost,
        tax,
        stage,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn default_scenario() -> QuoteInputs {
        QuoteInputs {
            components: ComponentInputs {
                w_beam: ComponentInput {
                    spec: ComponentSpec::new(dec!(2.5), None, dec!(450)),
                    included: true,
                },
                post: ComponentInput {
                    spec: ComponentSpec::new(dec!(4.5), Some(dec!(1800)), dec!(450)),
                    included: true,
                },
                spacer: ComponentInput {
                    spec: ComponentSpec::new(dec!(4.5), Some(dec!(330)), dec!(450)),
                    included: true,
                },
            },
            fasteners: FastenerSelection::Default,
            commercial: CommercialInputs {
                rate_per_kg: Some(dec!(65)),
                quantity_rm: Some(dec!(500)),
                ..Default::default()
            },
            jurisdiction: TaxJurisdiction::IntraState,
            progress: QuoteProgress::default(),
        }
    }

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::IncompleteSpecification {
            component: ComponentKind::Post,
            field: "length_mm",
        };
        assert!(err.to_string().contains("Post"));
        assert!(err.to_string().contains("length_mm"));

        assert!(PricingError::MissingRate.to_string().contains("rate"));
    }

    #[test]
    fn test_default_scenario_completes() {
        let evaluation = evaluate_quote(&default_scenario(), &BarrierConfig::double_w_beam());

        assert!(evaluation.issues.is_empty());
        let assembly = evaluation.assembly.unwrap();
        assert_eq!(assembly.total_set_weight_kg, dec!(149.6022337));
        assert_eq!(assembly.weight_per_rm_kg, dec!(37.400558425));

        let cost = evaluation.cost.unwrap();
        assert_eq!(cost.material_cost, dec!(2431.036297625));
        assert_eq!(cost.final_total, Some(dec!(1215518.1488125)));

        let tax = evaluation.tax.unwrap();
        assert_eq!(tax.sgst, dec!(109396.633393125));
        assert_eq!(tax.cgst, tax.sgst);
        assert!(evaluation.is_complete());
    }

    #[test]
    fn test_excluded_component_has_no_weight() {
        let mut inputs = default_scenario();
        inputs.components.spacer.included = false;
        let evaluation = evaluate_quote(&inputs, &BarrierConfig::double_w_beam());

        assert!(evaluation.components.spacer.weight.is_none());
        // 149.6022337 - 4 x 3.586275
        assert_eq!(evaluation.assembly.unwrap().total_set_weight_kg, dec!(135.2571337));
    }

    #[test]
    fn test_incomplete_spec_is_never_priced() {
        let mut inputs = default_scenario();
        inputs.components.post.spec.length_mm = None;
        inputs.progress = QuoteProgress {
            components_confirmed: true,
            fasteners_confirmed: true,
            commercials_confirmed: true,
            quantity_confirmed: true,
        };
        let evaluation = evaluate_quote(&inputs, &BarrierConfig::double_w_beam());

        assert_eq!(
            evaluation.issues,
            vec![PricingError::IncompleteSpecification {
                component: ComponentKind::Post,
                field: "length_mm"
            }]
        );
        assert!(evaluation.components.post.weight.is_none());
        assert!(evaluation.assembly.is_none());
        assert!(evaluation.cost.is_none());
        assert!(evaluation.tax.is_none());
        // Confirmed components are reopened for the missing field
        assert_eq!(evaluation.stage, QuoteStage::SpecifyingComponents);
        assert!(!evaluation.is_complete());
    }

    #[test]
    fn test_incomplete_spec_still_reports_missing_rate() {
        let mut inputs = default_scenario();
        inputs.components.w_beam.spec.coating_gsm = None;
        inputs.commercial.rate_per_kg = None;
        let evaluation = evaluate_quote(&inputs, &BarrierConfig::double_w_beam());

        assert_eq!(evaluation.issues.len(), 2);
        assert_eq!(evaluation.issues[1], PricingError::MissingRate);
    }

    #[test]
    fn test_huge_rate_is_reported_not_panicking() {
        let mut inputs = default_scenario();
        inputs.commercial.rate_per_kg = Some(Decimal::MAX);
        let evaluation = evaluate_quote(&inputs, &BarrierConfig::double_w_beam());

        assert_eq!(evaluation.issues, vec![PricingError::ValueOutOfRange]);
        assert!(evaluation.assembly.is_some());
        assert!(evaluation.cost.is_none());
        assert!(evaluation.tax.is_none());
        assert!(!evaluation.is_complete());
    }

    #[test]
    fn test_huge_dimensions_are_reported_not_panicking() {
        let mut inputs = default_scenario();
        inputs.components.post.spec.length_mm = Some(Decimal::MAX);
        inputs.components.post.spec.thickness_mm = Some(Decimal::MAX);
        inputs.commercial.quantity_rm = Some(Decimal::MAX);
        let evaluation = evaluate_quote(&inputs, &BarrierConfig::double_w_beam());

        assert_eq!(evaluation.issues, vec![PricingError::ValueOutOfRange]);
        assert!(evaluation.tax.is_none());
        assert!(!evaluation.is_complete());
    }

    #[test]
    fn test_missing_rate_leaves_cost_absent() {
        let mut inputs = default_scenario();
        inputs.commercial.rate_per_kg = None;
        let evaluation = evaluate_quote(&inputs, &BarrierConfig::double_w_beam());

        assert_eq!(evaluation.issues, vec![PricingError::MissingRate]);
        assert!(evaluation.cost.is_none());
        assert!(evaluation.tax.is_none());
        assert_eq!(evaluation.stage, QuoteStage::SpecifyingComponents);
    }

    #[test]
    fn test_missing_quantity_is_staged_not_an_error() {
        let mut inputs = default_scenario();
        inputs.commercial.quantity_rm = None;
        inputs.progress = QuoteProgress::default()
            .confirm(QuoteStage::SpecifyingComponents)
            .confirm(QuoteStage::SpecifyingFasteners)
            .confirm(QuoteStage::SpecifyingCommercials);
        let evaluation = evaluate_quote(&inputs, &BarrierConfig::double_w_beam());

        assert!(evaluation.issues.is_empty());
        assert!(evaluation.cost.unwrap().final_total.is_none());
        assert_eq!(evaluation.stage, QuoteStage::SpecifyingQuantity);
    }

    #[test]
    fn test_manual_mode_skips_component_validation() {
        let mut inputs = default_scenario();
        inputs.components.w_beam.spec = ComponentSpec::default();
        inputs.fasteners = FastenerSelection::Manual {
            hex_bolt_qty: 20,
            button_bolt_qty: 15,
        };
        inputs.commercial = CommercialInputs {
            rate_per_kg: Some(dec!(80)),
            ..Default::default()
        };
        inputs.jurisdiction = TaxJurisdiction::InterState;
        let evaluation = evaluate_quote(&inputs, &BarrierConfig::double_w_beam());

        assert!(evaluation.issues.is_empty());
        assert_eq!(evaluation.components, ComponentSelections::default());
        assert_eq!(evaluation.assembly.unwrap().total_set_weight_kg, dec!(4.875));
        assert_eq!(evaluation.cost.unwrap().final_total, Some(dec!(390)));
        let tax = evaluation.tax.unwrap();
        assert_eq!(tax.igst, dec!(70.2));
        assert_eq!(tax.total_with_tax, dec!(460.2));
        assert_eq!(tax.sgst + tax.cgst, Decimal::ZERO);
    }

    #[test]
    fn test_evaluation_depends_only_on_snapshot() {
        let config = BarrierConfig::double_w_beam();
        let inputs = default_scenario();

        let first = evaluate_quote(&inputs, &config);
        let mut edited = inputs.clone();
        edited.commercial.rate_per_kg = Some(dec!(1));
        let _ = evaluate_quote(&edited, &config);

        assert_eq!(evaluate_quote(&inputs, &config), first);
    }

    #[test]
    fn test_quote_inputs_from_json() {
        let inputs: QuoteInputs = serde_json::from_str(
            r#"{
                "components": {
                    "w_beam": {"spec": {"thickness_mm": "2.5", "coating_gsm": "450"}, "included": true}
                },
                "fasteners": {"mode": "manual", "hex_bolt_qty": 1, "button_bolt_qty": 2},
                "commercial": {"rate_per_kg": "80"},
                "jurisdiction": "inter_state"
            }"#,
        )
        .unwrap();

        assert!(inputs.components.w_beam.included);
        assert!(!inputs.components.post.included);
        assert!(inputs.fasteners.is_manual());
        assert_eq!(inputs.jurisdiction, TaxJurisdiction::InterState);
        assert_eq!(inputs.progress, QuoteProgress::default());
    }
}
