use axum::routing::any;
use axum::Router;

use crate::handlers::hello;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/hello", any(hello::hello))
}
