//! Diagnostic endpoint answering any method on `/hello`.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use axum::response::Html;

/// Fixed body returned by `/hello`.
pub const HELLO_BODY: &str = "<h1>Hello World!</h1>";

/// ANY /hello
///
/// Logs the received headers at debug level and returns a static fragment.
/// Credential-bearing headers are redacted. The request body is ignored.
pub async fn hello(headers: HeaderMap) -> Html<&'static str> {
    for (name, value) in &headers {
        let shown = if name == AUTHORIZATION || name == COOKIE {
            "<redacted>"
        } else {
            value.to_str().unwrap_or("<non-ascii>")
        };
        tracing::debug!(header = %name, value = shown, "Received header");
    }
    Html(HELLO_BODY)
}
