//! NATS message handlers

pub mod itinerary;
pub mod ping;

use std::sync::Arc;
use anyhow::Result;
use async_nats::Client;
use sqlx::PgPool;
use tracing::{info, error};
use tokio::select;

use crate::config::Config;

/// Start all message handlers
pub async fn start_handlers(client: Client, pool: PgPool, config: &Config) -> Result<()> {
    info!("Starting message handlers...");

    let jwt_secret = Arc::new(config.jwt_secret.clone());
    let params = config.suggestion;
    info!(
        "Itinerary engine: radius {} km, speed {} km/h, unknown hop {} h",
        params.cluster_radius_km, params.travel_speed_kmh, params.missing_coords_travel_hours
    );

    // Subscribe to all subjects
    let ping_sub = client.subscribe("tripline.ping").await?;
    let suggest_sub = client.subscribe("tripline.itinerary.suggest").await?;
    let apply_sub = client.subscribe("tripline.itinerary.apply").await?;

    info!("Subscribed to NATS subjects");

    let client_ping = client.clone();
    let client_suggest = client.clone();
    let client_apply = client.clone();

    let pool_suggest = pool.clone();
    let pool_apply = pool.clone();

    let jwt_secret_suggest = Arc::clone(&jwt_secret);
    let jwt_secret_apply = Arc::clone(&jwt_secret);

    // Spawn handlers
    let ping_handle = tokio::spawn(async move {
        ping::handle_ping(client_ping, ping_sub).await
    });

    let suggest_handle = tokio::spawn(async move {
        itinerary::handle_suggest(client_suggest, suggest_sub, pool_suggest, jwt_secret_suggest, params).await
    });

    let apply_handle = tokio::spawn(async move {
        itinerary::handle_apply(client_apply, apply_sub, pool_apply, jwt_secret_apply).await
    });

    info!("All handlers started, waiting for messages...");

    // Wait for any handler to finish (which means an error occurred)
    select! {
        result = ping_handle => {
            error!("Ping handler finished: {:?}", result);
        }
        result = suggest_handle => {
            error!("Itinerary suggest handler finished: {:?}", result);
        }
        result = apply_handle => {
            error!("Itinerary apply handler finished: {:?}", result);
        }
    }

    Ok(())
}
