//! Shared HTTP client and auth/status helpers.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::ChatError;

/// Per-request timeout applied by the shared client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default HTTP client");
                reqwest::Client::new()
            })
    })
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Map a non-success HTTP status to an error.
pub fn status_to_error(status: u16, body: &str) -> ChatError {
    match status {
        401 | 403 => ChatError::Authentication(error_message(body)),
        429 => ChatError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => ChatError::api(status, error_message(body)),
    }
}

/// Prefer `error.message` (OpenAI style) or `detail` (Tavily style) over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message").or(Some(e)))
                .or_else(|| v.get("detail"))
                .and_then(|m| match m {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Object(o) => o
                        .get("error")
                        .and_then(|e| e.as_str())
                        .map(str::to_string),
                    _ => None,
                })
        })
        .unwrap_or_else(|| body.to_string())
}

fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_authentication() {
        let err = status_to_error(401, r#"{"error":{"message":"Invalid API Key"}}"#);
        match err {
            ChatError::Authentication(msg) => assert_eq!(msg, "Invalid API Key"),
            other => panic!("expected Authentication, got {other:?}"),
        }
    }

    #[test]
    fn rate_limit_parses_retry_hint() {
        let err = status_to_error(429, r#"{"error":{"retry_after":1.5}}"#);
        assert!(matches!(
            err,
            ChatError::RateLimited {
                retry_after_ms: Some(1500)
            }
        ));
    }

    #[test]
    fn tavily_detail_body_is_unwrapped() {
        let err = status_to_error(400, r#"{"detail":{"error":"Query is missing."}}"#);
        assert_eq!(err.to_string(), "API error (status 400): Query is missing.");
    }

    #[test]
    fn plain_body_is_kept() {
        let err = status_to_error(502, "bad gateway");
        assert_eq!(err.to_string(), "API error (status 502): bad gateway");
    }
}
