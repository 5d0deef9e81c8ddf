//! Handler for `POST /authenticate`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use securechain_core::gateway::{CredentialRequest, IssuedToken};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /authenticate
///
/// Exchange a username and password for a signed token. Rejected credentials
/// answer 401 with `"Incorrect username or password"` and no token.
pub async fn authenticate(
    State(state): State<AppState>,
    body: Result<Json<CredentialRequest>, JsonRejection>,
) -> AppResult<Json<IssuedToken>> {
    let Json(input) = body?;
    let issued = state.gateway.authenticate(&input).await?;
    Ok(Json(issued))
}
