//! Token issuance and verification (HS256 compact JWS).
//!
//! `encode` and `decode` are pure apart from reading the immutable key, so a
//! single codec can be shared by every request.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use warden_core::{DomainError, SigningKey};

use crate::claims::{TokenClaims, TokenError, validate_claims};
use crate::Principal;

/// Transport header scheme prefix.
pub const BEARER_PREFIX: &str = "Bearer ";

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Longest accepted validity window (100 years). Keeps `iat + window` well
/// inside the range of representable timestamps.
pub const MAX_VALIDITY_SECS: i64 = 100 * 365 * 24 * 60 * 60;

/// A signed, self-contained token string plus its expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Header value presenting this token under the bearer scheme.
    pub fn bearer_value(&self) -> String {
        format!("{BEARER_PREFIX}{}", self.value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Signs principals into tokens and verifies tokens back into principals.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl TokenCodec {
    pub fn new(key: &SigningKey, validity: Duration) -> Result<Self, DomainError> {
        if validity < Duration::seconds(1) {
            return Err(DomainError::validation(
                "token validity window must be at least one second",
            ));
        }
        if validity > Duration::seconds(MAX_VALIDITY_SECS) {
            return Err(DomainError::validation(format!(
                "token validity window must not exceed {MAX_VALIDITY_SECS} seconds"
            )));
        }
        if key.is_short() {
            tracing::warn!(
                key_len = key.len(),
                "signing key is shorter than recommended ({} bytes)",
                SigningKey::RECOMMENDED_LEN
            );
        }

        // Expiry is checked against the caller's `now`, not the library's clock.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(key.expose_bytes()),
            decoding_key: DecodingKey::from_secret(key.expose_bytes()),
            validation,
            validity,
        })
    }

    /// Issue a token for `principal` valid from `now` for the configured window.
    pub fn encode(&self, principal: &Principal, now: DateTime<Utc>) -> Result<Token, TokenError> {
        let claims = TokenClaims::issue(principal, now, self.validity);
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| TokenError::Encoding("expiry out of range".to_string()))?;

        let value = jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(Token { value, expires_at })
    }

    /// Verify `token` and return the claims it carries.
    ///
    /// The signature is checked (in constant time) before any claim is
    /// trusted; expiry is then evaluated against `now`.
    pub fn decode_claims(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_jwt_error)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }

    /// Verify `token` and reconstruct the principal it asserts.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, TokenError> {
        self.decode_claims(token, now)?.to_principal()
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &ALGORITHM)
            .field("validity", &self.validity)
            .finish_non_exhaustive()
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}
