use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use warden_auth::{AuthError, AuthzError};

/// Login failures. Unknown user and wrong password share one response.
pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::InvalidCredentials => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            err.to_string(),
        ),
        AuthError::AccountDisabled => {
            json_error(StatusCode::UNAUTHORIZED, "account_disabled", err.to_string())
        }
        AuthError::Token(e) => {
            tracing::error!(error = %e, "token issuance failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_error",
                "could not issue token",
            )
        }
    }
}

/// Guard denials: 401 means "log in", 403 means "you lack permission".
pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    match err {
        AuthzError::Unauthenticated => {
            json_error(StatusCode::UNAUTHORIZED, "unauthenticated", err.to_string())
        }
        AuthzError::Forbidden(_) => json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string()),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
