use serde::{Deserialize, Serialize};

use crate::de;
use crate::{CoreError, CoreResult};

/// Routes offered by the custom trip builder. Anything else is kept verbatim
/// and priced with the default base rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TripRoute {
    DhakaCoxsBazar,
    BoguraCoxsBazar,
    DhakaSylhet,
    ChittagongSundarbans,
    Other(String),
}

impl TripRoute {
    pub fn as_str(&self) -> &str {
        match self {
            TripRoute::DhakaCoxsBazar => "Dhaka-Cox's Bazar",
            TripRoute::BoguraCoxsBazar => "Bogura-Cox's Bazar",
            TripRoute::DhakaSylhet => "Dhaka-Sylhet",
            TripRoute::ChittagongSundarbans => "Chittagong-Sundarbans",
            TripRoute::Other(name) => name,
        }
    }
}

impl From<String> for TripRoute {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Dhaka-Cox's Bazar" => TripRoute::DhakaCoxsBazar,
            "Bogura-Cox's Bazar" => TripRoute::BoguraCoxsBazar,
            "Dhaka-Sylhet" => TripRoute::DhakaSylhet,
            "Chittagong-Sundarbans" => TripRoute::ChittagongSundarbans,
            _ => TripRoute::Other(value),
        }
    }
}

impl From<TripRoute> for String {
    fn from(value: TripRoute) -> Self {
        match value {
            TripRoute::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HotelType {
    ThreeStar,
    FiveStar,
    Other(String),
}

impl HotelType {
    pub fn as_str(&self) -> &str {
        match self {
            HotelType::ThreeStar => "3-star",
            HotelType::FiveStar => "5-star",
            HotelType::Other(name) => name,
        }
    }
}

impl From<String> for HotelType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "3-star" => HotelType::ThreeStar,
            "5-star" => HotelType::FiveStar,
            _ => HotelType::Other(value),
        }
    }
}

impl From<HotelType> for String {
    fn from(value: HotelType) -> Self {
        match value {
            HotelType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransportType {
    Flight,
    Train,
    Bus,
    Other(String),
}

impl TransportType {
    pub fn as_str(&self) -> &str {
        match self {
            TransportType::Flight => "Flight",
            TransportType::Train => "Train",
            TransportType::Bus => "Bus",
            TransportType::Other(name) => name,
        }
    }
}

impl From<String> for TransportType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Flight" => TransportType::Flight,
            "Train" => TransportType::Train,
            "Bus" => TransportType::Bus,
            _ => TransportType::Other(value),
        }
    }
}

impl From<TransportType> for String {
    fn from(value: TransportType) -> Self {
        match value {
            TransportType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// A user-configured trip as submitted by the custom package form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPackageRequest {
    pub trip_route: TripRoute,
    #[serde(deserialize_with = "de::flexible_i32")]
    pub duration: i32,
    pub hotel_type: HotelType,
    #[serde(deserialize_with = "de::flexible_i32")]
    pub travelers: i32,
    pub transport_type: TransportType,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub food_included: bool,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub tour_guide: bool,
    #[serde(default, deserialize_with = "de::optional_i32")]
    pub room_count: Option<i32>,
}

impl CustomPackageRequest {
    /// Rejects non-positive day and traveler counts. Room count is informational
    /// but must not be negative when supplied.
    pub fn validate(&self) -> CoreResult<()> {
        if self.duration < 1 {
            return Err(CoreError::ValidationError(format!(
                "duration must be at least 1 day, got {}",
                self.duration
            )));
        }
        if self.travelers < 1 {
            return Err(CoreError::ValidationError(format!(
                "travelers must be at least 1, got {}",
                self.travelers
            )));
        }
        if let Some(rooms) = self.room_count {
            if rooms < 0 {
                return Err(CoreError::ValidationError(format!(
                    "room_count cannot be negative, got {}",
                    rooms
                )));
            }
        }
        Ok(())
    }
}

/// A persisted custom package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomPackage {
    pub custom_id: i64,
    #[serde(flatten)]
    pub request: CustomPackageRequest,
}
