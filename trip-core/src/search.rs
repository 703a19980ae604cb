use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::de;
use crate::offer::Offer;
use crate::package::Package;

/// Optional filters of the package search form. Every field is an
/// independent AND-clause; a missing field does not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, deserialize_with = "de::optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::optional_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::optional_f64")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_f64")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_i32")]
    pub group_size: Option<i32>,
    #[serde(default, deserialize_with = "de::optional_i32")]
    pub duration: Option<i32>,
    #[serde(default, deserialize_with = "de::optional_string")]
    pub discount_type: Option<String>,
    #[serde(default, deserialize_with = "de::optional_string")]
    pub hotel_type: Option<String>,
}

impl SearchFilters {
    /// Zero-valued numeric filters count as unset.
    pub fn normalized(mut self) -> Self {
        self.min_price = self.min_price.filter(|p| *p != 0.0);
        self.max_price = self.max_price.filter(|p| *p != 0.0);
        self.group_size = self.group_size.filter(|g| *g != 0);
        self.duration = self.duration.filter(|d| *d != 0);
        self
    }

    /// True when any clause needs an offer row to match.
    pub fn constrains_offers(&self) -> bool {
        self.group_size.is_some() || self.duration.is_some() || self.discount_type.is_some()
    }
}

/// A package with every offer attached to it, the unit the search filter
/// evaluates.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageWithOffers {
    pub package: Package,
    pub offers: Vec<Offer>,
}

/// One package in the search result, with the offer columns aggregated
/// (maximum) over the offers that matched the filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "SearchResultRow")]
pub struct PackageSearchResult {
    #[serde(flatten)]
    pub package: Package,
    pub discount_type: Option<String>,
    pub discount_percentage: Option<f64>,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
    pub min_group_size: Option<i32>,
    pub max_group_size: Option<i32>,
}

// Wire shape of a search hit: the package id and name go out as
// `package_id` / `package_name`, the booking site links on those.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultRow {
    #[serde(rename = "package_id")]
    package_id: i64,
    #[serde(rename = "package_name")]
    package_name: String,
    price: f64,
    start_location: String,
    trip_place: String,
    duration: i32,
    hotel_type: String,
    transport_type: String,
    #[serde(rename = "imageURL")]
    image_url: Option<String>,
    description: Option<String>,
    tour_guide: bool,
    food_included: bool,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(rename = "category_id")]
    category_id: Option<i64>,
    discount_type: Option<String>,
    discount_percentage: Option<f64>,
    min_duration: Option<i32>,
    max_duration: Option<i32>,
    min_group_size: Option<i32>,
    max_group_size: Option<i32>,
}

impl From<PackageSearchResult> for SearchResultRow {
    fn from(result: PackageSearchResult) -> Self {
        let p = result.package;
        SearchResultRow {
            package_id: p.id,
            package_name: p.name,
            price: p.price,
            start_location: p.start_location,
            trip_place: p.trip_place,
            duration: p.duration,
            hotel_type: p.hotel_type,
            transport_type: p.transport_type,
            image_url: p.image_url,
            description: p.description,
            tour_guide: p.tour_guide,
            food_included: p.food_included,
            start_date: p.start_date,
            end_date: p.end_date,
            category_id: p.category_id,
            discount_type: result.discount_type,
            discount_percentage: result.discount_percentage,
            min_duration: result.min_duration,
            max_duration: result.max_duration,
            min_group_size: result.min_group_size,
            max_group_size: result.max_group_size,
        }
    }
}
