//! Route definitions for event publishing.

use axum::routing::post;
use axum::Router;

use crate::handlers::publish;
use crate::state::AppState;

/// ```text
/// POST /publish  -> publish
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/publish", post(publish::publish))
}
