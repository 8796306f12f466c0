//! API-side role guard.
//!
//! Call at the top of a protected handler, before its body does any work.

use axum::response::Response;

use warden_auth::{IdentityContext, Role};

use crate::app::errors;

/// Check the request's identity against `required` (ANY-of), mapping a denial
/// to its HTTP response: 401 when no identity is present, 403 when the
/// identity lacks every required role.
pub fn require(identity: &IdentityContext, required: &[Role]) -> Result<(), Response> {
    warden_auth::require(identity, required).map_err(errors::authz_error_to_response)
}
