use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use trip_core::CustomPackageRequest;

use crate::error::{AppError, AppJson};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CustomPackageCreated {
    pub message: String,
    pub custom_id: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/packages", post(create_custom_package))
}

/// POST /api/packages
/// Store a trip from the custom package builder; price it later by `custom_id`.
async fn create_custom_package(
    State(state): State<AppState>,
    AppJson(request): AppJson<CustomPackageRequest>,
) -> Result<Json<CustomPackageCreated>, AppError> {
    request.validate()?;
    let custom_id = state.custom_package_repo.create_custom_package(&request).await?;

    Ok(Json(CustomPackageCreated {
        message: "Package added successfully".to_string(),
        custom_id,
    }))
}
