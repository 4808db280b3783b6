//! Orders the places of one day by category, sights first and evening spots last

use crate::types::{Place, PlaceCategory};

/// Lower values are visited earlier in the day
pub const fn priority(category: PlaceCategory) -> u8 {
    match category {
        PlaceCategory::Museum => 1,
        PlaceCategory::Activity => 2,
        PlaceCategory::PhotoSpot => 3,
        PlaceCategory::Dining => 4,
        PlaceCategory::Cafe => 5,
        PlaceCategory::Nightlife => 6,
        PlaceCategory::Other => 7,
    }
}

/// Stable sort by category priority; equal categories keep their input order.
pub fn sequence(places: &mut [Place]) {
    places.sort_by_key(|p| priority(p.category));
}
