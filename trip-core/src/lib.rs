pub mod custom_package;
pub mod de;
pub mod offer;
pub mod package;
pub mod repository;
pub mod search;

pub use custom_package::{CustomPackage, CustomPackageRequest, HotelType, TransportType, TripRoute};
pub use offer::{DiscountType, Offer, OfferInput};
pub use package::{CategorizedPackage, Category, Package, PackageInput};
pub use search::{PackageSearchResult, PackageWithOffers, SearchFilters};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
