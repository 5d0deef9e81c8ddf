//! Route definitions for authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST /authenticate  -> authenticate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/authenticate", post(auth::authenticate))
}
