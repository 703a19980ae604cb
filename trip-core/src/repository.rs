use async_trait::async_trait;

use crate::custom_package::{CustomPackage, CustomPackageRequest};
use crate::offer::{Offer, OfferInput};
use crate::package::{CategorizedPackage, Category, Package, PackageInput};
use crate::search::{PackageWithOffers, SearchFilters};
use crate::CoreResult;

/// Repository trait for category data access
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> CoreResult<Vec<Category>>;
}

/// Repository trait for catalog packages
#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn list_packages(&self) -> CoreResult<Vec<Package>>;

    async fn list_by_category(&self, category_id: i64) -> CoreResult<Vec<CategorizedPackage>>;

    async fn get_package(&self, id: i64) -> CoreResult<Option<Package>>;

    async fn create_package(&self, input: &PackageInput) -> CoreResult<i64>;

    /// Returns false when no package has this id.
    async fn update_package(&self, id: i64, input: &PackageInput) -> CoreResult<bool>;

    /// Removes the package and its offers. Returns false when nothing was deleted.
    async fn delete_package(&self, id: i64) -> CoreResult<bool>;

    /// Packages that may satisfy `filters`, each with all of its offers,
    /// newest first and at most `limit` of them. Implementations may return a
    /// superset; the caller re-applies the predicate, grouping and ordering.
    async fn search_candidates(
        &self,
        filters: &SearchFilters,
        limit: usize,
    ) -> CoreResult<Vec<PackageWithOffers>>;
}

/// Repository trait for promotional offers
#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn list_offers(&self, package_id: i64) -> CoreResult<Vec<Offer>>;

    async fn create_offer(&self, package_id: i64, input: &OfferInput) -> CoreResult<Offer>;
}

/// Repository trait for user-built custom packages
#[async_trait]
pub trait CustomPackageRepository: Send + Sync {
    async fn create_custom_package(&self, request: &CustomPackageRequest) -> CoreResult<i64>;

    async fn get_custom_package(&self, custom_id: i64) -> CoreResult<Option<CustomPackage>>;
}
