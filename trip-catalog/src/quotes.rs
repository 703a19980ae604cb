//! Repository-backed entry points used by the HTTP layer.

use tracing::debug;
use trip_core::repository::{CustomPackageRepository, OfferRepository, PackageRepository};
use trip_core::{CoreError, CoreResult, PackageSearchResult, SearchFilters};

use crate::discount::DiscountQuote;
use crate::pricing::{PriceBreakdown, PricingEngine};
use crate::search::PackageSearch;

/// Price a stored custom package.
pub async fn quote_custom_package(
    repo: &dyn CustomPackageRepository,
    engine: &PricingEngine,
    custom_id: i64,
) -> CoreResult<PriceBreakdown> {
    let custom = repo
        .get_custom_package(custom_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("custom package {}", custom_id)))?;

    let breakdown = engine.custom_package_price(&custom.request)?;
    debug!(custom_id, total = breakdown.total_price, "Priced custom package");
    Ok(breakdown)
}

/// Apply the package's offers to a traveler count.
pub async fn quote_package_discount(
    packages: &dyn PackageRepository,
    offers: &dyn OfferRepository,
    engine: &PricingEngine,
    package_id: i64,
    travellers: i32,
) -> CoreResult<DiscountQuote> {
    let package = packages
        .get_package(package_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("package {}", package_id)))?;
    let package_offers = offers.list_offers(package_id).await?;

    let quote = engine.package_discount(&package, &package_offers, travellers)?;
    debug!(
        package_id,
        travellers,
        offers = package_offers.len(),
        discount = quote.total_discount_percent,
        "Computed package discount"
    );
    Ok(quote)
}

pub async fn search_packages(
    packages: &dyn PackageRepository,
    search: &PackageSearch,
    filters: SearchFilters,
) -> CoreResult<Vec<PackageSearchResult>> {
    let filters = filters.normalized();
    let candidates = packages.search_candidates(&filters, search.page_size()).await?;
    let scanned = candidates.len();
    let results = search.run(&filters, candidates);
    debug!(scanned, matched = results.len(), "Package search");
    Ok(results)
}
