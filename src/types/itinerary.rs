//! Itinerary suggestion types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Place;

/// One proposed day of a trip. Derived on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// 1-based day, assigned by output order
    pub day: i32,
    pub places: Vec<Place>,
    /// Hours, rounded to one decimal place
    pub estimated_duration: f64,
    pub description: String,
}

/// Request to suggest days for the unscheduled places of a trip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestItineraryRequest {
    pub trip_id: Uuid,
}

/// Request to apply a suggestion: assign `day` to each listed place
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplySuggestionRequest {
    pub trip_id: Uuid,
    pub day: i32,
    pub place_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplySuggestionResponse {
    pub day: i32,
    /// Places whose day was written
    pub updated: Vec<Uuid>,
    /// Places that no longer exist in the trip
    pub missing: Vec<Uuid>,
}
