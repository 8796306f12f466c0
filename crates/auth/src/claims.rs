use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Principal;

/// Signed payload carried inside a token (transport-agnostic).
///
/// Field names follow registered JWT claim names; roles travel in the `auth`
/// claim as a comma-joined list in lexicographic order. Timestamps are
/// NumericDate (whole seconds since the epoch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the principal's username.
    pub sub: String,

    /// Canonical comma-joined role list.
    #[serde(rename = "auth")]
    pub roles: String,

    /// Issued-at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for `principal` issued at `now` (truncated to whole seconds).
    pub fn issue(principal: &Principal, now: DateTime<Utc>, validity: Duration) -> Self {
        let iat = now.timestamp();
        Self {
            sub: principal.username().to_string(),
            roles: principal.joined_roles(),
            iat,
            exp: iat + validity.num_seconds(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Rebuild the principal asserted by these claims.
    pub fn to_principal(&self) -> Result<Principal, TokenError> {
        Principal::new(self.sub.clone(), Principal::split_roles(&self.roles))
            .map_err(|_| TokenError::Malformed)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Deterministically validate the time window of decoded claims.
///
/// Signature verification happens before this; here only `iat`/`exp` are
/// checked against the single `now` sampled by the caller. A token is
/// expired from the exact `exp` instant onwards.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if claims.exp <= claims.iat {
        return Err(TokenError::Malformed);
    }
    let expires_at = claims.expires_at().ok_or(TokenError::Malformed)?;
    if now >= expires_at {
        return Err(TokenError::Expired);
    }
    Ok(())
}
