//! Handler for `POST /publish`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::bearer::BearerHeader;
use crate::state::AppState;

/// POST /publish
///
/// Forward the JSON body, paired with the caller's `Authorization` header, to
/// the message channel and echo the body back unchanged. Delivery is
/// fire-and-forget: a failed send still answers 200.
pub async fn publish(
    State(state): State<AppState>,
    BearerHeader(bearer): BearerHeader,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(payload) = body?;
    tracing::debug!(has_token = bearer.is_some(), "Publishing payload");
    Ok(Json(state.publisher.publish(payload, bearer)))
}
