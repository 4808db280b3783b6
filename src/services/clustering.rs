//! Seed-radius proximity clustering of unscheduled places
//!
//! Single greedy pass in input order. Each cluster is seeded by the first
//! unclustered geolocated place and takes every later unclustered place whose
//! distance to that seed is below the radius. Membership is decided against
//! the seed only: two members may be farther apart than the radius, and a
//! place near a member but not near the seed starts or joins another cluster.

use crate::services::geo::haversine_distance;
use crate::types::Place;

/// Group `places` into clusters of indices into the input slice.
///
/// Places without coordinates are appended to the first cluster, or form a
/// cluster of their own when no place is geolocated. Every index appears in
/// exactly one cluster; an empty input yields no clusters.
pub fn cluster_indices(places: &[Place], radius_km: f64) -> Vec<Vec<usize>> {
    let positions: Vec<_> = places.iter().map(Place::coordinates).collect();
    let mut clustered = vec![false; places.len()];
    let mut clusters: Vec<Vec<usize>> = Vec::new();

    for seed in 0..places.len() {
        let seed_coords = match positions[seed] {
            Some(coords) if !clustered[seed] => coords,
            _ => continue,
        };

        clustered[seed] = true;
        let mut cluster = vec![seed];

        for candidate in (seed + 1)..places.len() {
            if clustered[candidate] {
                continue;
            }
            if let Some(coords) = positions[candidate] {
                if haversine_distance(&seed_coords, &coords) < radius_km {
                    clustered[candidate] = true;
                    cluster.push(candidate);
                }
            }
        }

        clusters.push(cluster);
    }

    let unlocated: Vec<usize> = positions
        .iter()
        .enumerate()
        .filter(|(_, coords)| coords.is_none())
        .map(|(i, _)| i)
        .collect();

    if !unlocated.is_empty() {
        match clusters.first_mut() {
            Some(first) => first.extend(unlocated),
            None => clusters.push(unlocated),
        }
    }

    clusters
}
