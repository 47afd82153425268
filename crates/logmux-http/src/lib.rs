//! # Logmux HTTP Binding
//!
//! Axum middleware that snapshots each inbound request into a
//! [`RequestContext`] and keeps it bound for the duration of the request's
//! handling. Every log event emitted from a handler (or anything it awaits)
//! then carries that request's context without the call site doing anything
//! special.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/", get(handler))
//!     .layer(axum::middleware::from_fn(request_scope_middleware));
//! ```
//!
//! The middleware is purely additive: it never rejects or alters the
//! request or response.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::header::{HOST, USER_AGENT};
use http::HeaderName;

use logmux_core::RequestContext;

/// Bind the request snapshot around the downstream service
pub async fn request_scope_middleware(request: Request, next: Next) -> Response {
    let context = snapshot(&request);
    context.scope(next.run(request)).await
}

/// Snapshot the attributes the enrichment stages read.
///
/// Works on any `http::Request` body type so tests can use empty bodies.
pub fn snapshot<B>(request: &http::Request<B>) -> RequestContext {
    RequestContext::new(request.method().as_str(), full_url(request))
        .with_user_agent(header_str(request, USER_AGENT))
        .with_protocol(format!("{:?}", request.version()))
        .with_headers(request.headers().clone())
}

fn header_str<B>(request: &http::Request<B>, name: HeaderName) -> String {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Reconstruct the full request URL.
///
/// Server-side URIs usually arrive in origin-form (`/path?query`); the
/// authority then comes from the Host header. Without a Host header the
/// origin-form URI is the best available value.
fn full_url<B>(request: &http::Request<B>) -> String {
    let uri = request.uri();
    if uri.scheme().is_some() {
        return uri.to_string();
    }
    match request.headers().get(HOST).and_then(|value| value.to_str().ok()) {
        Some(host) => format!("http://{host}{uri}"),
        None => uri.to_string(),
    }
}
