//! Itinerary suggestion engine
//!
//! Turns the unscheduled places of a trip into a day-by-day proposal:
//! cluster by proximity, order each cluster by category, estimate the
//! time budget of each day. Pure and synchronous; all state is local to
//! a call, so concurrent suggestions for different trips do not interact.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::queries;
use crate::defaults::{
    DEFAULT_CLUSTER_RADIUS_KM, DEFAULT_MISSING_COORDS_TRAVEL_HOURS, DEFAULT_TRAVEL_SPEED_KMH,
};
use crate::services::clustering::cluster_indices;
use crate::services::duration::{estimate_hours, TravelModel};
use crate::services::sequencer::sequence;
use crate::types::{Place, Suggestion};

/// Tunable constants of the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionParams {
    pub cluster_radius_km: f64,
    pub travel_speed_kmh: f64,
    pub missing_coords_travel_hours: f64,
}

impl Default for SuggestionParams {
    fn default() -> Self {
        Self {
            cluster_radius_km: DEFAULT_CLUSTER_RADIUS_KM,
            travel_speed_kmh: DEFAULT_TRAVEL_SPEED_KMH,
            missing_coords_travel_hours: DEFAULT_MISSING_COORDS_TRAVEL_HOURS,
        }
    }
}

impl SuggestionParams {
    fn travel_model(&self) -> TravelModel {
        TravelModel {
            speed_kmh: self.travel_speed_kmh,
            missing_coords_hours: self.missing_coords_travel_hours,
        }
    }
}

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("failed to load unscheduled places: {0}")]
    Fetch(#[source] anyhow::Error),
}

/// Read side of the place store, as seen by the engine
#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Places of the trip with no assigned day, in a stable order
    async fn unscheduled_places(&self, trip_id: Uuid) -> anyhow::Result<Vec<Place>>;
}

#[async_trait]
impl PlaceSource for PgPool {
    async fn unscheduled_places(&self, trip_id: Uuid) -> anyhow::Result<Vec<Place>> {
        queries::place::list_unscheduled_places(self, trip_id).await
    }
}

/// Fetch the unscheduled places of a trip and propose days for them.
///
/// The caller has already checked that the trip belongs to the requester.
/// A failed fetch fails the whole call; no partial proposal is produced.
pub async fn suggest_for_trip(
    source: &dyn PlaceSource,
    trip_id: Uuid,
    params: &SuggestionParams,
) -> Result<Vec<Suggestion>, SuggestionError> {
    let places = source
        .unscheduled_places(trip_id)
        .await
        .map_err(SuggestionError::Fetch)?;

    debug!("Loaded {} unscheduled places for trip {}", places.len(), trip_id);

    let suggestions = suggest_days(places, params);

    info!(
        "Suggested {} day(s) for trip {}",
        suggestions.len(),
        trip_id
    );

    Ok(suggestions)
}

/// Propose one day per proximity cluster, in cluster order (day 1, day 2, ...).
pub fn suggest_days(places: Vec<Place>, params: &SuggestionParams) -> Vec<Suggestion> {
    let clusters = cluster_indices(&places, params.cluster_radius_km);
    let travel = params.travel_model();

    // Move each place out of the arena exactly once
    let mut arena: Vec<Option<Place>> = places.into_iter().map(Some).collect();

    clusters
        .into_iter()
        .enumerate()
        .map(|(i, indices)| {
            let mut day_places: Vec<Place> = indices
                .into_iter()
                .filter_map(|idx| arena[idx].take())
                .collect();

            sequence(&mut day_places);

            Suggestion {
                day: i as i32 + 1,
                estimated_duration: estimate_hours(&day_places, &travel),
                description: describe(&day_places),
                places: day_places,
            }
        })
        .collect()
}

/// Human-readable summary of a day: place count and category variety
fn describe(places: &[Place]) -> String {
    if places.len() == 1 {
        return "1 place to visit".to_string();
    }

    let distinct = places
        .iter()
        .map(|p| p.category)
        .collect::<HashSet<_>>()
        .len();

    let noun = if distinct == 1 { "category" } else { "categories" };
    format!("{} places to visit ({} distinct {})", places.len(), distinct, noun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlaceCategory;
    use anyhow::anyhow;
    use chrono::Utc;

    fn make_place(name: &str, category: PlaceCategory, coords: Option<(f64, f64)>) -> Place {
        Place {
            id: Uuid::new_v4(),
            trip_id: Uuid::nil(),
            name: name.to_string(),
            address: None,
            lat: coords.map(|c| c.0),
            lng: coords.map(|c| c.1),
            category,
            day: None,
            note: None,
            created_at: Utc::now(),
        }
    }

    fn paris() -> Vec<Place> {
        vec![
            make_place("Eiffel Tower", PlaceCategory::PhotoSpot, Some((48.8584, 2.2945))),
            make_place("Louvre", PlaceCategory::Museum, Some((48.8606, 2.3376))),
            make_place("Versailles bistro", PlaceCategory::Dining, Some((48.8049, 2.1204))),
        ]
    }

    fn names(suggestion: &Suggestion) -> Vec<&str> {
        suggestion.places.iter().map(|p| p.name.as_str()).collect()
    }

    struct FakeSource {
        places: Vec<Place>,
    }

    #[async_trait]
    impl PlaceSource for FakeSource {
        async fn unscheduled_places(&self, _trip_id: Uuid) -> anyhow::Result<Vec<Place>> {
            Ok(self.places.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl PlaceSource for FailingSource {
        async fn unscheduled_places(&self, _trip_id: Uuid) -> anyhow::Result<Vec<Place>> {
            Err(anyhow!("connection refused"))
        }
    }

    #[test]
    fn test_paris_scenario() {
        let suggestions = suggest_days(paris(), &SuggestionParams::default());

        assert_eq!(suggestions.len(), 2);

        assert_eq!(suggestions[0].day, 1);
        assert_eq!(names(&suggestions[0]), vec!["Louvre", "Eiffel Tower"]);
        // 2.5 + 0.5 visits, ~3.16 km at 30 km/h
        assert_eq!(suggestions[0].estimated_duration, 3.1);
        assert_eq!(
            suggestions[0].description,
            "2 places to visit (2 distinct categories)"
        );

        assert_eq!(suggestions[1].day, 2);
        assert_eq!(names(&suggestions[1]), vec!["Versailles bistro"]);
        assert_eq!(suggestions[1].estimated_duration, 1.5);
        assert_eq!(suggestions[1].description, "1 place to visit");
    }

    #[test]
    fn test_empty_input_gives_empty_list() {
        assert!(suggest_days(vec![], &SuggestionParams::default()).is_empty());
    }

    #[test]
    fn test_places_without_coordinates_form_single_day() {
        let places = vec![
            make_place("bar", PlaceCategory::Nightlife, None),
            make_place("bistro", PlaceCategory::Dining, None),
            make_place("gallery", PlaceCategory::Museum, None),
            make_place("brasserie", PlaceCategory::Dining, None),
        ];

        let suggestions = suggest_days(places, &SuggestionParams::default());

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].day, 1);
        assert_eq!(
            names(&suggestions[0]),
            vec!["gallery", "bistro", "brasserie", "bar"]
        );
        // 2.0 + 1.5 + 2.5 + 1.5, no travel
        assert_eq!(suggestions[0].estimated_duration, 7.5);
        assert_eq!(
            suggestions[0].description,
            "4 places to visit (3 distinct categories)"
        );
    }

    #[test]
    fn test_unlocated_places_join_day_one() {
        let mut places = paris();
        places.push(make_place("hidden cafe", PlaceCategory::Cafe, None));

        let suggestions = suggest_days(places, &SuggestionParams::default());

        assert_eq!(suggestions.len(), 2);
        assert_eq!(
            names(&suggestions[0]),
            vec!["Louvre", "Eiffel Tower", "hidden cafe"]
        );
        // 3.0 + 0.5 visits, ~0.105 h + 0.5 h travel
        assert_eq!(suggestions[0].estimated_duration, 4.1);
    }

    #[test]
    fn test_single_category_description() {
        let places = vec![
            make_place("orsay", PlaceCategory::Museum, Some((48.8600, 2.3266))),
            make_place("louvre", PlaceCategory::Museum, Some((48.8606, 2.3376))),
        ];

        let suggestions = suggest_days(places, &SuggestionParams::default());

        assert_eq!(suggestions.len(), 1);
        assert_eq!(
            suggestions[0].description,
            "2 places to visit (1 distinct category)"
        );
    }

    #[test]
    fn test_suggestions_partition_input() {
        let mut places = paris();
        places.push(make_place("unknown", PlaceCategory::Other, None));
        places.push(make_place("Sacre-Coeur", PlaceCategory::PhotoSpot, Some((48.8867, 2.3431))));
        places.push(make_place("Disneyland", PlaceCategory::Activity, Some((48.8722, 2.7758))));
        let mut input_ids: Vec<Uuid> = places.iter().map(|p| p.id).collect();

        let suggestions = suggest_days(places, &SuggestionParams::default());

        let mut output_ids: Vec<Uuid> = suggestions
            .iter()
            .flat_map(|s| s.places.iter().map(|p| p.id))
            .collect();
        input_ids.sort();
        output_ids.sort();
        assert_eq!(input_ids, output_ids);

        let days: Vec<i32> = suggestions.iter().map(|s| s.day).collect();
        assert_eq!(days, (1..=suggestions.len() as i32).collect::<Vec<_>>());
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let mut places = paris();
        places.push(make_place("unknown", PlaceCategory::Other, None));

        let first = suggest_days(places.clone(), &SuggestionParams::default());
        let second = suggest_days(places, &SuggestionParams::default());

        assert_eq!(first, second);
    }

    #[test]
    fn test_wider_radius_merges_days() {
        let params = SuggestionParams {
            cluster_radius_km: 20.0,
            ..SuggestionParams::default()
        };

        let suggestions = suggest_days(paris(), &params);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(
            names(&suggestions[0]),
            vec!["Louvre", "Eiffel Tower", "Versailles bistro"]
        );
    }

    #[tokio::test]
    async fn test_suggest_for_trip_uses_source() {
        let source = FakeSource { places: paris() };

        let suggestions = suggest_for_trip(&source, Uuid::new_v4(), &SuggestionParams::default())
            .await
            .unwrap();

        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_fetch_failure_propagates() {
        let result = tokio_test::block_on(suggest_for_trip(
            &FailingSource,
            Uuid::new_v4(),
            &SuggestionParams::default(),
        ));

        match result {
            Err(SuggestionError::Fetch(e)) => assert_eq!(e.to_string(), "connection refused"),
            Ok(_) => panic!("expected fetch failure"),
        }
    }
}
