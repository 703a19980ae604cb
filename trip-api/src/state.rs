use std::sync::Arc;
use trip_catalog::{PackageSearch, PricingEngine};
use trip_core::repository::{
    CategoryRepository, CustomPackageRepository, OfferRepository, PackageRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub category_repo: Arc<dyn CategoryRepository>,
    pub package_repo: Arc<dyn PackageRepository>,
    pub offer_repo: Arc<dyn OfferRepository>,
    pub custom_package_repo: Arc<dyn CustomPackageRepository>,
    pub pricing: Arc<PricingEngine>,
    pub search: Arc<PackageSearch>,
}
