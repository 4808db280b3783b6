/// Places closer than this to a cluster seed share a suggested day
pub const DEFAULT_CLUSTER_RADIUS_KM: f64 = 5.0;

/// Assumed average urban travel speed
pub const DEFAULT_TRAVEL_SPEED_KMH: f64 = 30.0;

/// Travel time for a hop where either end has no known position
pub const DEFAULT_MISSING_COORDS_TRAVEL_HOURS: f64 = 0.5;
