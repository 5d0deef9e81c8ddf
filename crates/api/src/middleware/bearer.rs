//! Raw bearer-credential extractor for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// The `Authorization` header value exactly as the caller sent it.
///
/// The value is opaque: it is not parsed, stripped of its `Bearer ` prefix,
/// or validated. `None` when the header is absent or is not visible ASCII.
/// Never rejects a request.
///
/// ```ignore
/// async fn my_handler(BearerHeader(bearer): BearerHeader) -> Json<()> {
///     tracing::debug!(has_token = bearer.is_some(), "handling request");
///     Json(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerHeader(pub Option<String>);

impl<S> FromRequestParts<S> for BearerHeader
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Ok(BearerHeader(value))
    }
}
