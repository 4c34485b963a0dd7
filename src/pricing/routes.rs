//! Pricing API route handlers.
//!
//! Stateless wrappers around the calculators; each request carries the
//! full input snapshot it needs.

use axum::{extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::AppState;

use super::calculators::{
    compute_assembly_weights, compute_component_weight, compute_cost_breakdown,
    compute_fastener_weight, compute_tax,
};
use super::models::TaxJurisdiction;
use super::requests::{
    AssemblyWeightsRequest, ComponentWeightRequest, CostBreakdownRequest, FastenerWeightRequest,
    TaxRequest,
};
use super::responses::{
    AssemblyWeightsResponse, ComponentWeightResponse, CostBreakdownResponse,
    FastenerWeightResponse, QuoteEvaluationResponse, TaxResponse,
};
use super::services::{evaluate_quote, QuoteInputs};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/component-weight", post(component_weight))
        .route("/api/pricing/fastener-weight", post(fastener_weight))
        .route("/api/pricing/assembly-weights", post(assembly_weights))
        .route("/api/pricing/cost-breakdown", post(cost_breakdown))
        .route("/api/pricing/tax", post(tax))
        .route("/api/pricing/evaluate", post(evaluate))
}

async fn component_weight(
    Json(req): Json<ComponentWeightRequest>,
) -> Result<Json<ComponentWeightResponse>> {
    let result = compute_component_weight(req.kind, &req.spec)?;
    Ok(Json(ComponentWeightResponse::new(req.kind, result)))
}

async fn fastener_weight(
    State(state): State<AppState>,
    Json(req): Json<FastenerWeightRequest>,
) -> Json<FastenerWeightResponse> {
    Json(FastenerWeightResponse {
        mode: req.fasteners.mode(),
        fastener_weight_kg: compute_fastener_weight(&req.fasteners, &state.barrier),
    })
}

async fn assembly_weights(
    State(state): State<AppState>,
    Json(req): Json<AssemblyWeightsRequest>,
) -> Result<Json<AssemblyWeightsResponse>> {
    let weights = compute_assembly_weights(&req.components, &state.barrier, &req.fasteners)?;
    Ok(Json(weights.into()))
}

async fn cost_breakdown(Json(req): Json<CostBreakdownRequest>) -> Result<Json<CostBreakdownResponse>> {
    let cost = compute_cost_breakdown(req.basis_weight_kg, &req.commercial, req.mode)?;
    Ok(Json(cost.into()))
}

/// Returns `null` when the total is not positive yet
async fn tax(Json(req): Json<TaxRequest>) -> Result<Json<Option<TaxResponse>>> {
    let jurisdiction = TaxJurisdiction::from_intra_state(req.is_intra_state);
    let tax = compute_tax(req.final_total, jurisdiction)?;
    Ok(Json(tax.map(Into::into)))
}

async fn evaluate(
    State(state): State<AppState>,
    Json(inputs): Json<QuoteInputs>,
) -> Json<QuoteEvaluationResponse> {
    Json(evaluate_quote(&inputs, &state.barrier).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn decimal(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
        let app = router().with_state(test_state());
        let response = app
            .oneshot(
                Request::post(path)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_component_weight_endpoint() {
        let (status, body) = post_json(
            "/api/pricing/component-weight",
            json!({"kind": "post", "spec": {"thickness_mm": "4.5", "length_mm": "1800", "coating_gsm": "450"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["total_weight_kg"]), dec!(22.82175));
    }

    #[tokio::test]
    async fn test_component_weight_incomplete_is_422() {
        let (status, body) = post_json(
            "/api/pricing/component-weight",
            json!({"kind": "spacer", "spec": {"thickness_mm": "4.5", "coating_gsm": "450"}}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error_type"], "incomplete_specification");
        assert_eq!(body["details"]["field"], "length_mm");
    }

    #[tokio::test]
    async fn test_fastener_weight_endpoint() {
        let (status, body) = post_json(
            "/api/pricing/fastener-weight",
            json!({"fasteners": {"mode": "manual", "hex_bolt_qty": 20, "button_bolt_qty": 15}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["fastener_weight_kg"]), dec!(4.875));
    }

    #[tokio::test]
    async fn test_cost_breakdown_missing_rate() {
        let (status, body) = post_json(
            "/api/pricing/cost-breakdown",
            json!({"basis_weight_kg": "37.4", "commercial": {}}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error_type"], "missing_rate");
    }

    #[tokio::test]
    async fn test_tax_endpoint() {
        let (status, body) =
            post_json("/api/pricing/tax", json!({"final_total": "390", "is_intra_state": false})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["igst"]["amount"]), dec!(70.2));
        assert_eq!(decimal(&body["total_with_tax"]["amount"]), dec!(460.2));
        assert_eq!(body["total_with_tax"]["currency"], "INR");

        let (_, body) = post_json("/api/pricing/tax", json!({"final_total": "0"})).await;
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_evaluate_endpoint_reports_issues() {
        let (status, body) = post_json(
            "/api/pricing/evaluate",
            json!({
                "components": {"w_beam": {"spec": {"thickness_mm": "2.5"}, "included": true}},
                "commercial": {"rate_per_kg": "65"}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["complete"], false);
        assert_eq!(body["issues"][0]["error_type"], "incomplete_specification");
        assert_eq!(body["issues"][0]["field"], "coating_gsm");
        assert!(body["assembly"].is_null());
        assert!(body["tax"].is_null());
    }

    #[tokio::test]
    async fn test_evaluate_endpoint_huge_rate_is_an_issue() {
        let (status, body) = post_json(
            "/api/pricing/evaluate",
            json!({
                "fasteners": {"mode": "manual", "hex_bolt_qty": 20, "button_bolt_qty": 15},
                "commercial": {"rate_per_kg": Decimal::MAX.to_string()}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["complete"], false);
        assert_eq!(body["issues"][0]["error_type"], "value_out_of_range");
    }

    #[tokio::test]
    async fn test_cost_breakdown_huge_quantity_is_422() {
        let (status, body) = post_json(
            "/api/pricing/cost-breakdown",
            json!({
                "basis_weight_kg": "37.4",
                "commercial": {"rate_per_kg": "65", "quantity_rm": Decimal::MAX.to_string()}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error_type"], "value_out_of_range");
    }
}
