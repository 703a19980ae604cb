use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use trip_catalog::{quotes, PriceBreakdown};
use trip_core::de;

use crate::error::{AppError, AppJson, AppPath};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CustomPriceResponse {
    pub total_price: f64,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRequest {
    #[serde(deserialize_with = "de::flexible_i64")]
    pub package_id: i64,
    #[serde(deserialize_with = "de::flexible_i32")]
    pub travellers: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResponse {
    pub base_cost: f64,
    pub total_discount: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub group_size_discount: f64,
    pub duration_discount: f64,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/calculate-price/{id}", get(calculate_price))
        .route("/calculate-discount", post(calculate_discount))
}

/// GET /calculate-price/{customId}
async fn calculate_price(
    State(state): State<AppState>,
    AppPath(custom_id): AppPath<i64>,
) -> Result<Json<CustomPriceResponse>, AppError> {
    let breakdown =
        quotes::quote_custom_package(state.custom_package_repo.as_ref(), &state.pricing, custom_id).await?;

    Ok(Json(CustomPriceResponse {
        total_price: breakdown.total_price,
        breakdown,
    }))
}

/// POST /calculate-discount
async fn calculate_discount(
    State(state): State<AppState>,
    AppJson(req): AppJson<DiscountRequest>,
) -> Result<Json<DiscountResponse>, AppError> {
    let quote = quotes::quote_package_discount(
        state.package_repo.as_ref(),
        state.offer_repo.as_ref(),
        &state.pricing,
        req.package_id,
        req.travellers,
    )
    .await?;

    Ok(Json(DiscountResponse {
        base_cost: quote.base_cost,
        total_discount: quote.total_discount_percent,
        discount_amount: quote.discount_amount,
        final_price: quote.final_price,
        group_size_discount: quote.group_size_discount,
        duration_discount: quote.duration_discount,
    }))
}
