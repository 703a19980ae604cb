use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use trip_core::{Offer, OfferInput};

use crate::error::{AppError, AppJson, AppPath};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/packages/{id}/offers", get(list_offers).post(create_offer))
}

async fn ensure_package(state: &AppState, package_id: i64) -> Result<(), AppError> {
    match state.package_repo.get_package(package_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFoundError(format!("Package {} not found", package_id))),
    }
}

/// GET /packages/{id}/offers
async fn list_offers(
    State(state): State<AppState>,
    AppPath(package_id): AppPath<i64>,
) -> Result<Json<Vec<Offer>>, AppError> {
    ensure_package(&state, package_id).await?;
    let offers = state.offer_repo.list_offers(package_id).await?;
    Ok(Json(offers))
}

/// POST /packages/{id}/offers
async fn create_offer(
    State(state): State<AppState>,
    AppPath(package_id): AppPath<i64>,
    AppJson(input): AppJson<OfferInput>,
) -> Result<(StatusCode, Json<Offer>), AppError> {
    input.validate()?;
    ensure_package(&state, package_id).await?;

    let offer = state.offer_repo.create_offer(package_id, &input).await?;
    tracing::info!(
        "Offer {} ({} {}%) attached to package {}",
        offer.id,
        offer.discount_type.as_str(),
        offer.discount_percentage,
        package_id
    );
    Ok((StatusCode::CREATED, Json(offer)))
}
