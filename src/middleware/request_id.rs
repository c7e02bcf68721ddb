//! Per-request correlation id
//!
//! Every request gets a UUID v4 that appears in the handler logs and is
//! echoed back to the client in a response header, so a support report with
//! an id can be matched to the server-side trace.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id carried through the request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Attach a fresh `RequestId` to the request and to the response headers
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::generate();

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        "Incoming request"
    );

    request.extensions_mut().insert(request_id);
    let mut response = next.run(request).await;

    // A UUID is always a valid header value; the fallible path exists only
    // to satisfy the HeaderValue API
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }

    #[test]
    fn test_request_id_displays_as_uuid() {
        let id = RequestId::generate();
        assert_eq!(id.to_string().len(), 36);
        assert!(HeaderValue::from_str(&id.to_string()).is_ok());
    }
}
