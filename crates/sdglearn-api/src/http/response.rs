//! Envelope response format for all API responses.
//!
//! Every response is wrapped in a consistent envelope:
//! ```json
//! {
//!   "data": { ... },
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 5 },
//!   "errors": [],
//!   "_links": { "self": "..." }
//! }
//! ```

use std::collections::HashMap;
use std::time::Instant;

use serde::Serialize;

/// Per-request context: identifier and start time for the envelope meta.
///
/// Handlers create one at the top and pass it to [`ApiResponse::ok`].
pub struct RequestCtx {
    pub request_id: String,
    started: Instant,
}

impl RequestCtx {
    pub fn new() -> Self {
        Self {
            request_id: uuid::Uuid::now_v7().to_string(),
            started: Instant::now(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl Default for RequestCtx {
    fn default() -> Self {
        Self::new()
    }
}

/// Envelope response wrapping all API data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// The main response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Request metadata.
    pub meta: ApiMeta,

    /// Error list (empty on success).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,

    /// HATEOAS-style links for discoverability.
    #[serde(rename = "_links", skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, String>,
}

/// Metadata included in every response.
#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// Unique request identifier for tracing.
    pub request_id: String,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
    /// Response time in milliseconds.
    pub response_time_ms: u64,
}

/// Individual error detail.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response with data.
    pub fn ok(data: T, ctx: &RequestCtx) -> Self {
        Self {
            data: Some(data),
            meta: ApiMeta {
                request_id: ctx.request_id.clone(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                response_time_ms: ctx.elapsed_ms(),
            },
            errors: Vec::new(),
            links: HashMap::new(),
        }
    }

    /// Add a HATEOAS link.
    pub fn with_link(mut self, rel: &str, href: &str) -> Self {
        self.links.insert(rel.to_string(), href.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let ctx = RequestCtx::new();
        let resp = ApiResponse::ok(serde_json::json!({"hello": "world"}), &ctx)
            .with_link("self", "/api/v1/sdgs");
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["data"]["hello"], "world");
        assert_eq!(json["meta"]["request_id"], ctx.request_id);
        assert_eq!(json["_links"]["self"], "/api/v1/sdgs");
        // Empty error list is omitted entirely
        assert!(json.get("errors").is_none());
    }
}
