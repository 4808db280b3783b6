//! Itinerary suggestion handlers

use std::sync::Arc;

use anyhow::Result;
use async_nats::{Client, Subscriber};
use futures::StreamExt;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::auth;
use crate::db::queries;
use crate::services::itinerary::{suggest_for_trip, SuggestionParams};
use crate::types::{
    ApplySuggestionRequest, ApplySuggestionResponse, ErrorResponse, Request,
    SuccessResponse, SuggestItineraryRequest,
};

async fn publish<T: Serialize>(client: &Client, reply: async_nats::Subject, body: &T) -> Result<()> {
    let _ = client.publish(reply, serde_json::to_vec(body)?.into()).await;
    Ok(())
}

/// Check that the trip exists and belongs to the requester.
///
/// Publishes the error reply itself and returns false when the request must stop.
async fn authorize_trip<T>(
    client: &Client,
    reply: &async_nats::Subject,
    pool: &PgPool,
    request: &Request<T>,
    trip_id: Uuid,
    jwt_secret: &str,
) -> Result<bool> {
    let auth_info = match auth::extract_auth(request, jwt_secret) {
        Ok(info) => info,
        Err(_) => {
            let error = ErrorResponse::new(request.id, "UNAUTHORIZED", "Authentication required");
            publish(client, reply.clone(), &error).await?;
            return Ok(false);
        }
    };

    match queries::trip::get_trip(pool, trip_id, auth_info.user_id).await {
        Ok(Some(_)) => Ok(true),
        Ok(None) => {
            let error = ErrorResponse::new(request.id, "NOT_FOUND", "Trip not found");
            publish(client, reply.clone(), &error).await?;
            Ok(false)
        }
        Err(e) => {
            error!("Failed to load trip {}: {}", trip_id, e);
            let error = ErrorResponse::new(request.id, "DATABASE_ERROR", e.to_string());
            publish(client, reply.clone(), &error).await?;
            Ok(false)
        }
    }
}

/// Handle itinerary.suggest messages
pub async fn handle_suggest(
    client: Client,
    mut subscriber: Subscriber,
    pool: PgPool,
    jwt_secret: Arc<String>,
    params: SuggestionParams,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received itinerary.suggest message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let request: Request<SuggestItineraryRequest> = match serde_json::from_slice(&msg.payload) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
                publish(&client, reply, &error).await?;
                continue;
            }
        };

        let trip_id = request.payload.trip_id;
        if !authorize_trip(&client, &reply, &pool, &request, trip_id, &jwt_secret).await? {
            continue;
        }

        match suggest_for_trip(&pool, trip_id, &params).await {
            Ok(suggestions) => {
                let response = SuccessResponse::new(request.id, suggestions);
                publish(&client, reply, &response).await?;
            }
            Err(e) => {
                error!("Failed to suggest itinerary for trip {}: {}", trip_id, e);
                let error = ErrorResponse::new(
                    request.id,
                    "INTERNAL_ERROR",
                    "Failed to generate suggestions",
                );
                publish(&client, reply, &error).await?;
            }
        }
    }

    Ok(())
}

/// Handle itinerary.apply messages
///
/// Each place is updated on its own; a failure part-way leaves earlier
/// places with their new day.
pub async fn handle_apply(
    client: Client,
    mut subscriber: Subscriber,
    pool: PgPool,
    jwt_secret: Arc<String>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received itinerary.apply message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let request: Request<ApplySuggestionRequest> = match serde_json::from_slice(&msg.payload) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
                publish(&client, reply, &error).await?;
                continue;
            }
        };

        if request.payload.day < 1 {
            let error = ErrorResponse::new(request.id, "INVALID_REQUEST", "Day must be 1 or greater");
            publish(&client, reply, &error).await?;
            continue;
        }

        let trip_id = request.payload.trip_id;
        if !authorize_trip(&client, &reply, &pool, &request, trip_id, &jwt_secret).await? {
            continue;
        }

        let day = request.payload.day;
        let mut updated = Vec::new();
        let mut missing = Vec::new();
        let mut failure = None;

        for &place_id in &request.payload.place_ids {
            match queries::place::set_place_day(&pool, trip_id, place_id, day).await {
                Ok(true) => updated.push(place_id),
                Ok(false) => missing.push(place_id),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if let Some(e) = failure {
            error!(
                "Failed to apply day {} to trip {} after {} place(s): {}",
                day,
                trip_id,
                updated.len(),
                e
            );
            let error = ErrorResponse::new(request.id, "DATABASE_ERROR", e.to_string());
            publish(&client, reply, &error).await?;
            continue;
        }

        info!(
            "Applied day {} to {} place(s) of trip {} ({} missing)",
            day,
            updated.len(),
            trip_id,
            missing.len()
        );

        let response = SuccessResponse::new(
            request.id,
            ApplySuggestionResponse { day, updated, missing },
        );
        publish(&client, reply, &response).await?;
    }

    Ok(())
}
