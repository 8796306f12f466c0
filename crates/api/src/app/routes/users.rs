//! User lookups gated by role.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::Response,
};

use warden_auth::{IdentityContext, policy};

use crate::app::dto::UserResponse;
use crate::app::{AppServices, errors};
use crate::authz;

/// GET /api/user - the caller's own record (USER or ADMIN).
pub async fn current_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
) -> Result<Json<UserResponse>, Response> {
    authz::require(&identity, policy::USER_OR_ADMIN)?;

    let username = identity
        .current_username()
        .ok_or_else(|| errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "authentication required"))?;

    lookup(&services, username)
}

/// GET /api/user/:username - any user's record (ADMIN only).
pub async fn user_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, Response> {
    authz::require(&identity, policy::ADMIN_ONLY)?;

    lookup(&services, &username)
}

fn lookup(services: &AppServices, username: &str) -> Result<Json<UserResponse>, Response> {
    services
        .directory
        .find_by_username(username)
        .map(|user| Json(user.into()))
        .ok_or_else(|| errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"))
}
