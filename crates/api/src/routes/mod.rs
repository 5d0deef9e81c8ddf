pub mod auth;
pub mod health;
pub mod hello;
pub mod publish;

use axum::Router;

use crate::state::AppState;

/// Build the root route tree.
///
/// ```text
/// POST /authenticate     credential pair -> token
/// POST /publish          payload -> message channel, echoed back
/// ANY  /hello            diagnostic fragment
/// GET  /health           liveness
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(publish::router())
        .merge(hello::router())
        .merge(health::router())
}
