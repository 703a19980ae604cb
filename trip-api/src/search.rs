use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use trip_catalog::quotes;
use trip_core::{PackageSearchResult, SearchFilters};

use crate::error::{AppError, AppJson};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub packages: Vec<PackageSearchResult>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/search-packages", post(search_packages))
}

/// POST /search-packages
/// Every filter is optional; `{}` lists the newest packages.
async fn search_packages(
    State(state): State<AppState>,
    AppJson(filters): AppJson<SearchFilters>,
) -> Result<Json<SearchResponse>, AppError> {
    let packages = quotes::search_packages(state.package_repo.as_ref(), &state.search, filters).await?;
    Ok(Json(SearchResponse { packages }))
}
