//! Pricing engine for MBCB quotations.
//!
//! Computes component weights, set weight per running metre, landed cost
//! and GST for double W-beam crash barriers. Served to the CRM over
//! HTTP/JSON.

pub mod calculators;
pub mod models;
pub mod profiles;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod workflow;

// Re-export commonly used items
pub use calculators::{
    compute_assembly_weights, compute_component_weight, compute_cost_breakdown,
    compute_fastener_weight, compute_tax, round_money,
};
pub use models::{BarrierConfig, FastenerSelection, TaxJurisdiction};
pub use routes::router;
pub use services::{evaluate_quote, PricingError, QuoteEvaluation, QuoteInputs};
pub use workflow::{QuoteProgress, QuoteStage};
