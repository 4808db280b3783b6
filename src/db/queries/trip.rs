//! Trip database queries

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::types::Trip;

/// Get a trip by ID, only if it belongs to the user
pub async fn get_trip(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Option<Trip>> {
    let trip = sqlx::query_as::<_, Trip>(
        r#"
        SELECT id, user_id, name, destination, start_date, end_date, created_at, updated_at
        FROM trips
        WHERE id = $1 AND user_id = $2
        "#
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(trip)
}
