use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use warden_auth::{Authenticator, IdentityContext, RequestId};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<Authenticator>,
}

/// Creates the request's [`IdentityContext`] and ingests its bearer token.
///
/// Runs before every route. It never rejects: requests without a usable
/// token continue anonymously and protected handlers decide via the guard.
/// A well-formed inbound `x-request-id` is kept; otherwise a fresh one is minted.
pub async fn identity_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let mut identity = IdentityContext::for_request(inbound_request_id(req.headers()));
    state
        .authenticator
        .ingest(authorization_header(req.headers()), &mut identity);

    let request_id = identity.request_id();
    tracing::debug!(
        %request_id,
        method = %req.method(),
        path = req.uri().path(),
        authenticated = identity.is_authenticated(),
        "request received"
    );

    req.extensions_mut().insert(identity);
    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

fn inbound_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_default()
}

/// The raw `Authorization` value, if present and visible ASCII.
fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}
