//! Login and per-request token ingestion.

use std::sync::Arc;

use thiserror::Error;

use warden_core::{Clock, SystemClock};

use crate::claims::TokenError;
use crate::directory::{CredentialVerifier, UserDirectory, dummy_password_hash};
use crate::token::{BEARER_PREFIX, Token, TokenCodec};
use crate::{Credentials, IdentityContext, Principal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password. Deliberately one variant.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("account is disabled")]
    AccountDisabled,

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Composes directory lookup, credential verification and token issuance.
#[derive(Clone)]
pub struct Authenticator {
    codec: TokenCodec,
    directory: Arc<dyn UserDirectory>,
    verifier: Arc<dyn CredentialVerifier>,
    clock: Arc<dyn Clock>,
}

impl Authenticator {
    pub fn new(
        codec: TokenCodec,
        directory: Arc<dyn UserDirectory>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        // Pay for the unknown-user hash up front, not on the first miss.
        let _ = dummy_password_hash();
        Self {
            codec,
            directory,
            verifier,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Verify credentials and issue a token.
    ///
    /// On success the principal is also installed into `identity`: the request
    /// that logs in is authenticated for the rest of its own processing.
    /// The activation flag is only consulted once the password has verified.
    pub fn login(
        &self,
        credentials: &Credentials,
        identity: &mut IdentityContext,
    ) -> Result<Token, AuthError> {
        let request_id = identity.request_id();

        let Some(user) = self.directory.find_by_username(&credentials.username) else {
            let _ = self.verifier.verify(&credentials.password, dummy_password_hash());
            tracing::debug!(%request_id, username = %credentials.username, "login rejected: unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verifier.verify(&credentials.password, &user.password_hash) {
            tracing::debug!(%request_id, username = %credentials.username, "login rejected: bad password");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.activated {
            tracing::info!(%request_id, username = %user.username, "login rejected: account disabled");
            return Err(AuthError::AccountDisabled);
        }

        // A record that cannot form a principal cannot hold a token either.
        let principal = Principal::new(user.username, user.roles).map_err(|e| {
            tracing::warn!(%request_id, error = %e, "directory record is not a valid principal");
            AuthError::InvalidCredentials
        })?;

        let token = self.codec.encode(&principal, self.clock.now())?;
        tracing::info!(
            %request_id,
            username = principal.username(),
            expires_at = %token.expires_at(),
            "login succeeded"
        );

        identity.set(principal);
        Ok(token)
    }

    /// Establish the request's identity from its transport header.
    ///
    /// Never fails: an absent, mis-shaped, tampered or expired token leaves
    /// the context anonymous so that public operations remain reachable.
    pub fn ingest(&self, header: Option<&str>, identity: &mut IdentityContext) {
        let Some(token) = header.and_then(extract_bearer) else {
            return;
        };

        match self.codec.decode(token, self.clock.now()) {
            Ok(principal) => {
                tracing::debug!(
                    request_id = %identity.request_id(),
                    username = principal.username(),
                    "request authenticated"
                );
                identity.set(principal);
            }
            Err(e) => {
                tracing::debug!(
                    request_id = %identity.request_id(),
                    error = %e,
                    "ignoring unusable bearer token"
                );
            }
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

/// Strip the bearer scheme; `None` unless the value is `"Bearer "` + a non-empty token.
pub fn extract_bearer(header: &str) -> Option<&str> {
    let token = header.strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
