use serde::{Deserialize, Serialize};
use trip_core::{CoreError, CoreResult, DiscountType, Offer, Package};

use crate::pricing::PricingEngine;

/// How offers are matched and stacked.
///
/// The defaults reproduce the live site: only the lower bound of an offer's
/// group-size / duration range is checked, and the two discounts stack without
/// a cap, so a final price can go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountPolicy {
    /// Also require `travellers <= maxGroupSize` and `duration <= maxDuration`.
    pub enforce_upper_bounds: bool,
    /// Clamp the stacked percentage to 0-100 so the final price stays within [0, baseCost].
    pub clamp_final_price: bool,
}

impl DiscountPolicy {
    fn in_range(&self, value: i32, min: Option<i32>, max: Option<i32>) -> bool {
        // An offer without a lower bound never applies.
        let Some(min) = min else {
            return false;
        };
        if value < min {
            return false;
        }
        !self.enforce_upper_bounds || max.map_or(true, |max| value <= max)
    }
}

/// Discounted price of a catalog package for a traveler count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiscountQuote {
    pub base_cost: f64,
    pub group_size_discount: f64,
    pub duration_discount: f64,
    pub total_discount_percent: f64,
    pub discount_amount: f64,
    pub final_price: f64,
}

impl PricingEngine {
    /// Best group-size offer plus best duration offer, applied to
    /// `price * travellers`.
    pub fn package_discount(
        &self,
        package: &Package,
        offers: &[Offer],
        travellers: i32,
    ) -> CoreResult<DiscountQuote> {
        if travellers < 1 {
            return Err(CoreError::ValidationError(format!(
                "travellers must be at least 1, got {}",
                travellers
            )));
        }

        let policy = self.config().discount_policy;
        let base_cost = package.price * f64::from(travellers);

        let group_size_discount = best_percentage(offers, DiscountType::GroupSize, |o| {
            policy.in_range(travellers, o.min_group_size, o.max_group_size)
        });
        let duration_discount = best_percentage(offers, DiscountType::Duration, |o| {
            policy.in_range(package.duration, o.min_duration, o.max_duration)
        });

        let mut total_discount_percent = group_size_discount + duration_discount;
        if policy.clamp_final_price {
            total_discount_percent = total_discount_percent.clamp(0.0, 100.0);
        }

        let discount_amount = base_cost * total_discount_percent / 100.0;

        Ok(DiscountQuote {
            base_cost,
            group_size_discount,
            duration_discount,
            total_discount_percent,
            discount_amount,
            final_price: base_cost - discount_amount,
        })
    }
}

// Highest percentage among applicable offers of one kind, 0 when none apply.
fn best_percentage<F>(offers: &[Offer], kind: DiscountType, applies: F) -> f64
where
    F: Fn(&Offer) -> bool,
{
    offers
        .iter()
        .filter(|o| o.discount_type == kind && applies(*o))
        .map(|o| o.discount_percentage)
        .fold(0.0, f64::max)
}
