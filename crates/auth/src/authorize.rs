use thiserror::Error;

use crate::{IdentityContext, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// No valid identity is present on the request.
    #[error("authentication required")]
    Unauthenticated,

    /// Identity present but it holds none of the required roles.
    #[error("forbidden: requires one of [{0}]")]
    Forbidden(String),
}

/// Role sets used by the host's protected operations.
pub mod policy {
    use crate::Role;

    /// Any authenticated user holding `ADMIN` or `USER`.
    pub const USER_OR_ADMIN: &[Role] = &[Role::ADMIN, Role::USER];

    /// `ADMIN` only.
    pub const ADMIN_ONLY: &[Role] = &[Role::ADMIN];
}

/// Authorize the current request against a required role set.
///
/// ANY-of semantics: the principal must hold at least one role in `required`
/// (an empty set therefore admits nobody). Call this at the top of a protected
/// operation, after the request's token has been ingested.
///
/// - No IO
/// - No panics
pub fn require(identity: &IdentityContext, required: &[Role]) -> Result<(), AuthzError> {
    let Some(principal) = identity.current() else {
        tracing::debug!(request_id = %identity.request_id(), "denied: anonymous request");
        return Err(AuthzError::Unauthenticated);
    };

    if principal.has_any_role(required) {
        Ok(())
    } else {
        let required = required
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(",");
        tracing::info!(
            request_id = %identity.request_id(),
            username = principal.username(),
            required = %required,
            "denied: missing role"
        );
        Err(AuthzError::Forbidden(required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Principal;

    fn ctx_with(roles: &[Role]) -> IdentityContext {
        let mut ctx = IdentityContext::new();
        ctx.set(Principal::new("alice", roles.iter().cloned()).unwrap());
        ctx
    }

    #[test]
    fn anonymous_is_unauthenticated() {
        let ctx = IdentityContext::new();
        assert_eq!(require(&ctx, policy::ADMIN_ONLY), Err(AuthzError::Unauthenticated));
        assert_eq!(require(&ctx, policy::USER_OR_ADMIN), Err(AuthzError::Unauthenticated));
    }

    #[test]
    fn admin_only_denies_plain_user() {
        let err = require(&ctx_with(&[Role::USER]), policy::ADMIN_ONLY).unwrap_err();
        assert!(matches!(err, AuthzError::Forbidden(_)));
        assert!(err.to_string().contains("ADMIN"));
    }

    #[test]
    fn admin_only_allows_admins() {
        assert_eq!(require(&ctx_with(&[Role::ADMIN]), policy::ADMIN_ONLY), Ok(()));
        assert_eq!(
            require(&ctx_with(&[Role::ADMIN, Role::USER]), policy::ADMIN_ONLY),
            Ok(())
        );
    }

    #[test]
    fn user_or_admin_is_any_of() {
        assert_eq!(require(&ctx_with(&[Role::USER]), policy::USER_OR_ADMIN), Ok(()));
        assert_eq!(require(&ctx_with(&[Role::ADMIN]), policy::USER_OR_ADMIN), Ok(()));
    }

    #[test]
    fn principal_without_roles_is_forbidden() {
        let err = require(&ctx_with(&[]), policy::USER_OR_ADMIN).unwrap_err();
        assert!(matches!(err, AuthzError::Forbidden(_)));
    }

    #[test]
    fn empty_requirement_admits_nobody() {
        let err = require(&ctx_with(&[Role::ADMIN]), &[]).unwrap_err();
        assert!(matches!(err, AuthzError::Forbidden(_)));
    }

    #[test]
    fn unknown_roles_do_not_grant_access() {
        let err = require(&ctx_with(&[Role::new("AUDITOR")]), policy::ADMIN_ONLY).unwrap_err();
        assert!(matches!(err, AuthzError::Forbidden(_)));
    }
}
