use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::de;
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// A pre-defined catalog package. `price` is per traveler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: i64,
    pub name: String,
    #[serde(rename = "imageURL", alias = "imageUrl")]
    pub image_url: Option<String>,
    pub start_location: String,
    pub trip_place: String,
    pub price: f64,
    pub duration: i32,
    pub hotel_type: String,
    pub food_included: bool,
    pub tour_guide: bool,
    pub transport_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    #[serde(rename = "category_id")]
    pub category_id: Option<i64>,
}

/// Package row joined with its category name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedPackage {
    #[serde(flatten)]
    pub package: Package,
    #[serde(rename = "category_name")]
    pub category_name: String,
}

/// Create/update payload of the admin package form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInput {
    pub name: String,
    #[serde(default, alias = "imageURL", deserialize_with = "de::optional_string")]
    pub image_url: Option<String>,
    pub start_location: String,
    pub trip_place: String,
    #[serde(deserialize_with = "de::flexible_f64")]
    pub price: f64,
    #[serde(deserialize_with = "de::flexible_i32")]
    pub duration: i32,
    pub hotel_type: String,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub food_included: bool,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub tour_guide: bool,
    pub transport_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, deserialize_with = "de::optional_string")]
    pub description: Option<String>,
    #[serde(default, rename = "category_id", alias = "categoryId")]
    pub category_id: Option<i64>,
}

impl PackageInput {
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ValidationError("name is required".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }
        if self.duration < 1 {
            return Err(CoreError::ValidationError(format!(
                "duration must be at least 1 day, got {}",
                self.duration
            )));
        }
        if self.end_date < self.start_date {
            return Err(CoreError::ValidationError(format!(
                "endDate {} is before startDate {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }
}
