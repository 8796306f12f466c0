//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use warden_auth::{
    Argon2Verifier, AuthConfig, Authenticator, CredentialVerifier, TokenCodec, UserDirectory,
};
use warden_core::DomainError;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared per-process services handed to handlers.
#[derive(Clone)]
pub struct AppServices {
    pub authenticator: Arc<Authenticator>,
    pub directory: Arc<dyn UserDirectory>,
}

/// Build the full HTTP router with the Argon2 credential verifier.
pub fn build_app(auth: &AuthConfig, directory: Arc<dyn UserDirectory>) -> Result<Router, DomainError> {
    build_app_with(auth, directory, Arc::new(Argon2Verifier))
}

/// Build the router around an explicit credential verifier.
pub fn build_app_with(
    auth: &AuthConfig,
    directory: Arc<dyn UserDirectory>,
    verifier: Arc<dyn CredentialVerifier>,
) -> Result<Router, DomainError> {
    let codec = TokenCodec::new(&auth.signing_key, auth.token_validity)?;
    let authenticator = Arc::new(Authenticator::new(codec, directory.clone(), verifier));

    let services = Arc::new(AppServices {
        authenticator: authenticator.clone(),
        directory,
    });
    let auth_state = middleware::AuthState { authenticator };

    // Every route sees an IdentityContext; guards inside handlers decide access.
    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    auth_state,
                    middleware::identity_middleware,
                ))
                .layer(Extension(services)),
        ))
}
