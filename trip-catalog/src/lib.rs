pub mod pricing;
pub mod discount;
pub mod search;
pub mod quotes;

pub use pricing::{PriceBreakdown, PricingConfig, PricingEngine, RateTable};
pub use discount::{DiscountPolicy, DiscountQuote};
pub use search::PackageSearch;
