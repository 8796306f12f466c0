use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use warden_auth::{Credentials, IdentityContext};

use crate::app::dto::{LoginRequest, TokenResponse};
use crate::app::{AppServices, errors};

/// POST /api/authenticate - exchange username/password for a bearer token.
///
/// The token is returned in the body and echoed as an `Authorization` header.
pub async fn authenticate(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(mut identity): Extension<IdentityContext>,
    Json(body): Json<LoginRequest>,
) -> Response {
    let credentials: Credentials = body.into();
    let authenticator = services.authenticator.clone();

    // Password verification is CPU-bound; keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || {
        let result = authenticator.login(&credentials, &mut identity);
        (result, identity)
    })
    .await;

    let (result, identity) = match outcome {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "login task failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "login could not be processed",
            );
        }
    };

    match result {
        Ok(token) => {
            tracing::debug!(
                request_id = %identity.request_id(),
                username = identity.current_username().unwrap_or_default(),
                "issued token"
            );
            let bearer = token.bearer_value();
            let expires_at = token.expires_at();
            let body = TokenResponse {
                token: token.into_string(),
                expires_at,
            };
            (
                StatusCode::OK,
                [(header::AUTHORIZATION, bearer)],
                Json(body),
            )
                .into_response()
        }
        Err(e) => errors::auth_error_to_response(e),
    }
}
