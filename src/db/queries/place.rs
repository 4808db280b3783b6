//! Place database queries

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::types::Place;

/// List places of a trip that have no assigned day.
///
/// Ordered by creation time, then id, so repeated calls see the same order.
pub async fn list_unscheduled_places(pool: &PgPool, trip_id: Uuid) -> Result<Vec<Place>> {
    let places = sqlx::query_as::<_, Place>(
        r#"
        SELECT id, trip_id, name, address, lat, lng, category, day, note, created_at
        FROM places
        WHERE trip_id = $1 AND day IS NULL
        ORDER BY created_at ASC, id ASC
        "#
    )
    .bind(trip_id)
    .fetch_all(pool)
    .await?;

    Ok(places)
}

/// Assign a day to a single place of a trip.
///
/// Returns false when the place does not exist in the trip.
pub async fn set_place_day(
    pool: &PgPool,
    trip_id: Uuid,
    place_id: Uuid,
    day: i32,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE places
        SET day = $1
        WHERE id = $2 AND trip_id = $3
        "#
    )
    .bind(day)
    .bind(place_id)
    .bind(trip_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
