//! `warden-auth` — stateless token authentication and role-based authorization.
//!
//! This crate is intentionally decoupled from HTTP and storage: the host layer
//! hands in a header value and an [`IdentityContext`] per request, and user
//! records come from a [`UserDirectory`] implementation.

pub mod authenticate;
pub mod authorize;
pub mod claims;
pub mod config;
pub mod context;
pub mod directory;
pub mod principal;
pub mod roles;
pub mod token;

pub use authenticate::{AuthError, Authenticator, extract_bearer};
pub use authorize::{AuthzError, policy, require};
pub use claims::{TokenClaims, TokenError, validate_claims};
pub use config::{AuthConfig, ConfigError};
pub use context::{IdentityContext, RequestId};
pub use directory::{
    Argon2Verifier, CredentialVerifier, InMemoryUserDirectory, UserDirectory, UserRecord,
};
pub use principal::{Credentials, Principal};
pub use roles::Role;
pub use token::{BEARER_PREFIX, Token, TokenCodec};
