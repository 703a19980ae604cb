use serde::{Deserialize, Serialize};

use crate::de;
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscountType {
    GroupSize,
    Duration,
    Other(String),
}

impl DiscountType {
    pub fn as_str(&self) -> &str {
        match self {
            DiscountType::GroupSize => "Group Size",
            DiscountType::Duration => "Duration",
            DiscountType::Other(name) => name,
        }
    }
}

impl From<String> for DiscountType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Group Size" => DiscountType::GroupSize,
            "Duration" => DiscountType::Duration,
            _ => DiscountType::Other(value),
        }
    }
}

impl From<DiscountType> for String {
    fn from(value: DiscountType) -> Self {
        match value {
            DiscountType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// A promotional rule attached to a catalog package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: i64,
    #[serde(rename = "package_id")]
    pub package_id: i64,
    pub discount_type: DiscountType,
    pub discount_percentage: f64,
    pub min_group_size: Option<i32>,
    pub max_group_size: Option<i32>,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferInput {
    pub discount_type: DiscountType,
    #[serde(deserialize_with = "de::flexible_f64")]
    pub discount_percentage: f64,
    #[serde(default, deserialize_with = "de::optional_i32")]
    pub min_group_size: Option<i32>,
    #[serde(default, deserialize_with = "de::optional_i32")]
    pub max_group_size: Option<i32>,
    #[serde(default, deserialize_with = "de::optional_i32")]
    pub min_duration: Option<i32>,
    #[serde(default, deserialize_with = "de::optional_i32")]
    pub max_duration: Option<i32>,
}

impl OfferInput {
    pub fn validate(&self) -> CoreResult<()> {
        if !(0.0..=100.0).contains(&self.discount_percentage) {
            return Err(CoreError::ValidationError(format!(
                "discountPercentage must be within 0-100, got {}",
                self.discount_percentage
            )));
        }
        if let DiscountType::Other(name) = &self.discount_type {
            return Err(CoreError::ValidationError(format!(
                "unknown discountType {:?}",
                name
            )));
        }
        check_range("group size", self.min_group_size, self.max_group_size)?;
        check_range("duration", self.min_duration, self.max_duration)
    }
}

fn check_range(label: &str, min: Option<i32>, max: Option<i32>) -> CoreResult<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(CoreError::ValidationError(format!(
            "min {} {} exceeds max {}",
            label, min, max
        ))),
        _ => Ok(()),
    }
}
