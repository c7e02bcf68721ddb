//! Client identifier extraction
//!
//! Interceptor composed ahead of the chat orchestrator. It resolves the
//! network-origin key used for rate limiting and exposes it as an
//! extension; the extraction function is a parameter so deployments behind
//! different proxy setups (or tests) can swap it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

/// Network-origin key for rate-limit bucketing
#[derive(Debug, Clone)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Function resolving a request to its client identifier
pub type ClientIdExtractor = Arc<dyn Fn(&Request) -> String + Send + Sync>;

/// Default extraction: first `X-Forwarded-For` hop, else peer address
///
/// The forwarded header is client-controllable in principle; behind the
/// expected reverse proxy it is overwritten per hop, and the peer address
/// covers direct deployments.
pub fn forwarded_for_or_peer(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        && let Some(first_hop) = forwarded.split(',').next()
    {
        let first_hop = first_hop.trim();
        if !first_hop.is_empty() {
            return first_hop.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware attaching the extracted `ClientId` to the request
pub async fn client_id_middleware(
    State(extractor): State<ClientIdExtractor>,
    mut request: Request,
    next: Next,
) -> Response {
    let client_id = ClientId(extractor(&request));
    request.extensions_mut().insert(client_id);
    next.run(request).await
}
