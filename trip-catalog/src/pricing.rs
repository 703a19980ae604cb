use serde::{Deserialize, Serialize};
use trip_core::{CoreResult, CustomPackageRequest, HotelType, TransportType, TripRoute};

use crate::discount::DiscountPolicy;

/// Base price of one named route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRate {
    pub route: TripRoute,
    pub base_price: f64,
}

/// Per-day rate of a hotel tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRate {
    pub hotel_type: HotelType,
    pub per_day: f64,
}

/// Per-traveler rate of a transport mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportRate {
    pub transport_type: TransportType,
    pub per_traveler: f64,
}

/// Unit rates of the custom trip builder.
///
/// Each table maps an enum variant to its rate; anything not listed falls
/// back to the matching `default_*` value. Adding a route or tier is a
/// configuration change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    pub routes: Vec<RouteRate>,
    pub default_route_base: f64,
    pub hotels: Vec<HotelRate>,
    pub default_hotel_per_day: f64,
    pub transports: Vec<TransportRate>,
    pub default_transport_per_traveler: f64,
    /// Charged per traveler per day when food is included.
    pub food_per_traveler_day: f64,
    /// Charged per day (not per traveler) when a guide is booked.
    pub guide_per_day: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            routes: vec![
                RouteRate { route: TripRoute::DhakaCoxsBazar, base_price: 2000.0 },
                RouteRate { route: TripRoute::BoguraCoxsBazar, base_price: 3000.0 },
                RouteRate { route: TripRoute::DhakaSylhet, base_price: 2500.0 },
                RouteRate { route: TripRoute::ChittagongSundarbans, base_price: 3500.0 },
            ],
            default_route_base: 1000.0,
            hotels: vec![HotelRate { hotel_type: HotelType::FiveStar, per_day: 2000.0 }],
            default_hotel_per_day: 1000.0,
            transports: vec![
                TransportRate { transport_type: TransportType::Flight, per_traveler: 5000.0 },
                TransportRate { transport_type: TransportType::Train, per_traveler: 2000.0 },
            ],
            default_transport_per_traveler: 1000.0,
            food_per_traveler_day: 300.0,
            guide_per_day: 500.0,
        }
    }
}

impl RateTable {
    pub fn route_base(&self, route: &TripRoute) -> f64 {
        self.routes
            .iter()
            .find(|r| &r.route == route)
            .map_or(self.default_route_base, |r| r.base_price)
    }

    pub fn hotel_per_day(&self, hotel_type: &HotelType) -> f64 {
        self.hotels
            .iter()
            .find(|h| &h.hotel_type == hotel_type)
            .map_or(self.default_hotel_per_day, |h| h.per_day)
    }

    pub fn transport_per_traveler(&self, transport_type: &TransportType) -> f64 {
        self.transports
            .iter()
            .find(|t| &t.transport_type == transport_type)
            .map_or(self.default_transport_per_traveler, |t| t.per_traveler)
    }
}

/// Itemized price of a custom package.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub hotel: f64,
    pub transport: f64,
    pub food: f64,
    pub guide: f64,
    pub total_price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub rates: RateTable,
    pub discount_policy: DiscountPolicy,
}

/// Stateless pricing engine for custom packages and catalog discounts
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Price a custom trip:
    /// base + hotel * days + transport * travelers + food * travelers * days + guide * days
    pub fn custom_package_price(&self, request: &CustomPackageRequest) -> CoreResult<PriceBreakdown> {
        request.validate()?;

        let rates = &self.config.rates;
        let days = f64::from(request.duration);
        let travelers = f64::from(request.travelers);

        let food_rate = if request.food_included { rates.food_per_traveler_day } else { 0.0 };
        let guide_rate = if request.tour_guide { rates.guide_per_day } else { 0.0 };

        let base_price = rates.route_base(&request.trip_route);
        let hotel = rates.hotel_per_day(&request.hotel_type) * days;
        let transport = rates.transport_per_traveler(&request.transport_type) * travelers;
        let food = food_rate * travelers * days;
        let guide = guide_rate * days;

        Ok(PriceBreakdown {
            base_price,
            hotel,
            transport,
            food,
            guide,
            total_price: base_price + hotel + transport + food + guide,
        })
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}
