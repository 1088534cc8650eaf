//! Response envelope builders.
//!
//! Every response carries the same CORS/content-type header set. Successful
//! responses add per-invocation metadata; error responses carry only the
//! fixed set and the bare error message.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::core::models::{HandlerResponse, Outcome};
use crate::errors::FunctionError;

pub const ALLOWED_REQUEST_HEADERS: &[&str] = &[
    "Origin",
    "X-Requested-With",
    "Content-Type",
    "Accept",
    "Authorization",
    "Cache-Control",
    "Pragma",
];

/// Per-invocation values stamped onto successful responses.
#[derive(Debug, Clone)]
pub struct InvocationMeta {
    pub request_id: String,
    pub expiration_time: Option<String>,
    pub started: Instant,
}

impl InvocationMeta {
    #[must_use]
    pub fn start(request_id: impl Into<String>, expiration_time: Option<String>) -> Self {
        Self {
            request_id: request_id.into(),
            expiration_time,
            started: Instant::now(),
        }
    }

    #[must_use]
    pub fn elapsed_millis(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}

#[must_use]
pub fn fixed_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Request-Headers".to_string(),
            ALLOWED_REQUEST_HEADERS.join(","),
        ),
    ])
}

fn headers_with_meta(meta: &InvocationMeta) -> BTreeMap<String, String> {
    let mut headers = fixed_headers();
    headers.insert("Request-Id".to_string(), meta.request_id.clone());
    if let Some(expiration) = &meta.expiration_time {
        headers.insert("Expiration-Time".to_string(), expiration.clone());
    }
    headers.insert(
        "Execution-Time".to_string(),
        meta.elapsed_millis().to_string(),
    );
    headers
}

// ============================================================================
// Response Builders
// ============================================================================

/// Returns a 200 response with `body` already JSON-encoded.
#[must_use]
pub fn ok(body: String, meta: &InvocationMeta) -> HandlerResponse {
    HandlerResponse {
        status_code: 200,
        headers: headers_with_meta(meta),
        body,
    }
}

/// Returns a 301 redirect to `location`.
#[must_use]
pub fn redirect(location: &str, meta: &InvocationMeta) -> HandlerResponse {
    let mut headers = headers_with_meta(meta);
    headers.insert("Location".to_string(), location.to_string());
    HandlerResponse {
        status_code: 301,
        headers,
        body: format!("Redirecting to {location}"),
    }
}

/// Returns the 400 response used for every failure kind.
#[must_use]
pub fn error(err: &FunctionError) -> HandlerResponse {
    HandlerResponse {
        status_code: 400,
        headers: fixed_headers(),
        body: err.to_string(),
    }
}

#[must_use]
pub fn from_outcome(outcome: &Outcome, meta: &InvocationMeta) -> HandlerResponse {
    match outcome {
        Outcome::Json(value) => ok(value.to_string(), meta),
        Outcome::Redirect(location) => redirect(location, meta),
    }
}
