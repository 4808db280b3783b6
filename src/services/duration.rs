//! Visit and travel time estimates for a day's sequence of places

use crate::services::geo;
use crate::types::{Place, PlaceCategory};

/// Hours typically spent at a place of the given category
pub const fn visit_hours(category: PlaceCategory) -> f64 {
    match category {
        PlaceCategory::Dining => 1.5,
        PlaceCategory::Nightlife => 2.0,
        PlaceCategory::Cafe => 0.5,
        PlaceCategory::PhotoSpot => 0.5,
        PlaceCategory::Museum => 2.5,
        PlaceCategory::Activity => 2.0,
        PlaceCategory::Other => 1.0,
    }
}

/// Travel time model between consecutive stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelModel {
    pub speed_kmh: f64,
    /// Used when either end of a hop has no position
    pub missing_coords_hours: f64,
}

impl TravelModel {
    pub fn hop_hours(&self, from: &Place, to: &Place) -> f64 {
        match (from.coordinates(), to.coordinates()) {
            (Some(a), Some(b)) => geo::travel_hours(&a, &b, self.speed_kmh),
            _ => self.missing_coords_hours,
        }
    }
}

/// Total hours for visiting `places` in the given order, rounded to one decimal.
///
/// A sequence without a single geolocated place carries no travel term.
pub fn estimate_hours(places: &[Place], travel: &TravelModel) -> f64 {
    let visits: f64 = places.iter().map(|p| visit_hours(p.category)).sum();

    let travel_total: f64 = if places.iter().any(|p| p.coordinates().is_some()) {
        places
            .windows(2)
            .map(|pair| travel.hop_hours(&pair[0], &pair[1]))
            .sum()
    } else {
        0.0
    };

    round_to_tenth(visits + travel_total)
}

fn round_to_tenth(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}
