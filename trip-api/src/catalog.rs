use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use trip_core::{CategorizedPackage, Category, Package, PackageInput};

use crate::error::{AppError, AppJson, AppPath};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/packages/category/{id}", get(list_by_category))
        .route("/manage-packages", get(list_packages))
        .route("/manage-packages/{id}", axum::routing::delete(delete_package))
        .route("/packages", axum::routing::post(create_package))
        .route("/packages/{id}", get(get_package).put(update_package))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /categories
async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, AppError> {
    let categories = state.category_repo.list_categories().await?;
    Ok(Json(categories))
}

/// GET /packages/category/{id}
async fn list_by_category(
    State(state): State<AppState>,
    AppPath(category_id): AppPath<i64>,
) -> Result<Json<Vec<CategorizedPackage>>, AppError> {
    let packages = state.package_repo.list_by_category(category_id).await?;
    Ok(Json(packages))
}

/// GET /manage-packages
async fn list_packages(State(state): State<AppState>) -> Result<Json<Vec<Package>>, AppError> {
    let packages = state.package_repo.list_packages().await?;
    Ok(Json(packages))
}

/// GET /packages/{id}
async fn get_package(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Package>, AppError> {
    state
        .package_repo
        .get_package(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Package {} not found", id)))
}

/// POST /packages
async fn create_package(
    State(state): State<AppState>,
    AppJson(input): AppJson<PackageInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    input.validate()?;
    let id = state.package_repo.create_package(&input).await?;
    tracing::info!("Package {} created: {}", id, input.name);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Package added successfully".to_string(),
            id,
        }),
    ))
}

/// PUT /packages/{id}
async fn update_package(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<PackageInput>,
) -> Result<Json<MessageResponse>, AppError> {
    input.validate()?;
    if !state.package_repo.update_package(id, &input).await? {
        return Err(AppError::NotFoundError(format!("Package {} not found", id)));
    }

    Ok(Json(MessageResponse {
        message: "Package updated successfully".to_string(),
    }))
}

/// DELETE /manage-packages/{id}
/// Offers attached to the package go with it
async fn delete_package(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.package_repo.delete_package(id).await? {
        return Err(AppError::NotFoundError(format!("Package {} not found", id)));
    }
    tracing::info!("Package {} deleted", id);

    Ok(Json(MessageResponse {
        message: "Package deleted successfully".to_string(),
    }))
}
