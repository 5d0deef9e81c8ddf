//! The envelope handed to the outbound message channel.

use serde::Serialize;

/// Bearer value recorded when the caller sent no `Authorization` header.
///
/// Downstream consumers match on this exact string, so it must not change.
pub const MISSING_TOKEN_SENTINEL: &str = "jwt_Null";

/// A caller's payload paired with the bearer credential it arrived with.
///
/// Serialized as `{"bearerToken": "...", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    /// Raw `Authorization` header value, or [`MISSING_TOKEN_SENTINEL`].
    pub bearer_token: String,
    /// The caller's document, untouched.
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Wrap `payload`, substituting the sentinel when `bearer_token` is `None`.
    pub fn new(bearer_token: Option<String>, payload: serde_json::Value) -> Self {
        Self {
            bearer_token: bearer_token.unwrap_or_else(|| MISSING_TOKEN_SENTINEL.to_string()),
            payload,
        }
    }

    /// Whether the caller supplied a bearer credential.
    pub fn has_token(&self) -> bool {
        self.bearer_token != MISSING_TOKEN_SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_token_becomes_sentinel() {
        let envelope = EventEnvelope::new(None, json!({"id": 1}));
        assert_eq!(envelope.bearer_token, "jwt_Null");
        assert!(!envelope.has_token());
    }

    #[test]
    fn supplied_token_is_kept_verbatim() {
        let envelope = EventEnvelope::new(Some("Bearer abc".into()), json!({}));
        assert_eq!(envelope.bearer_token, "Bearer abc");
        assert!(envelope.has_token());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let envelope = EventEnvelope::new(None, json!({"id": 42, "note": "x"}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"bearerToken": "jwt_Null", "payload": {"id": 42, "note": "x"}})
        );
    }
}
