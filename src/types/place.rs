//! Place (point of interest) types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// GPS coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Place category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "place_category", rename_all = "kebab-case")]
pub enum PlaceCategory {
    Dining,
    Nightlife,
    Cafe,
    PhotoSpot,
    Museum,
    Activity,
    Other,
}

impl PlaceCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            PlaceCategory::Dining => "dining",
            PlaceCategory::Nightlife => "nightlife",
            PlaceCategory::Cafe => "cafe",
            PlaceCategory::PhotoSpot => "photo-spot",
            PlaceCategory::Museum => "museum",
            PlaceCategory::Activity => "activity",
            PlaceCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A place the traveller wants to visit, owned by a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: Uuid,
    #[serde(default)]
    pub trip_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category: PlaceCategory,
    /// Assigned day of the trip, `None` while unscheduled
    pub day: Option<i32>,
    pub note: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Place {
    /// Position of the place, present only when both latitude and longitude are set
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.day.is_some()
    }
}
