//! Process configuration for token signing.
//!
//! The signing secret has no built-in default: it must be provisioned by the
//! environment (or whatever lookup the caller supplies).

use chrono::Duration;
use thiserror::Error;

use warden_core::SigningKey;

use crate::token::MAX_VALIDITY_SECS;

pub const SECRET_VAR: &str = "WARDEN_JWT_SECRET";
pub const VALIDITY_VAR: &str = "WARDEN_TOKEN_VALIDITY_SECS";

/// Default token validity window (one hour).
pub const DEFAULT_VALIDITY_SECS: i64 = 3_600;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub signing_key: SigningKey,
    pub token_validity: Duration,
}

impl AuthConfig {
    pub fn new(signing_key: SigningKey) -> Self {
        Self {
            signing_key,
            token_validity: Duration::seconds(DEFAULT_VALIDITY_SECS),
        }
    }

    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.token_validity = validity;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary key → value lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_VAR)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing(SECRET_VAR))?;
        let signing_key = SigningKey::new(secret).map_err(|e| ConfigError::Invalid {
            name: SECRET_VAR,
            reason: e.to_string(),
        })?;

        let validity_secs = match lookup(VALIDITY_VAR) {
            None => DEFAULT_VALIDITY_SECS,
            Some(raw) => {
                let secs = raw.trim().parse::<i64>().map_err(|e| ConfigError::Invalid {
                    name: VALIDITY_VAR,
                    reason: e.to_string(),
                })?;
                if secs <= 0 || secs > MAX_VALIDITY_SECS {
                    return Err(ConfigError::Invalid {
                        name: VALIDITY_VAR,
                        reason: format!("must be between 1 and {MAX_VALIDITY_SECS} seconds"),
                    });
                }
                secs
            }
        };
        let validity = Duration::try_seconds(validity_secs).ok_or_else(|| ConfigError::Invalid {
            name: VALIDITY_VAR,
            reason: "out of range".to_string(),
        })?;

        Ok(Self::new(signing_key).with_validity(validity))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn secret_is_required() {
        let err = AuthConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(SECRET_VAR));

        let err = AuthConfig::from_lookup(lookup(&[(SECRET_VAR, "")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(SECRET_VAR));
    }

    #[test]
    fn validity_defaults_to_one_hour() {
        let cfg = AuthConfig::from_lookup(lookup(&[(SECRET_VAR, "s3cr3t")])).unwrap();
        assert_eq!(cfg.token_validity, Duration::hours(1));
        assert_eq!(cfg.signing_key.expose_bytes(), b"s3cr3t");
    }

    #[test]
    fn validity_is_configurable() {
        let cfg = AuthConfig::from_lookup(lookup(&[(SECRET_VAR, "s3cr3t"), (VALIDITY_VAR, " 900 ")]))
            .unwrap();
        assert_eq!(cfg.token_validity, Duration::minutes(15));
    }

    #[test]
    fn validity_must_be_positive_integer() {
        for bad in [
            "0",
            "-60",
            "soon",
            "1.5",
            "1000000000000000",
            "100000000000000000",
            "99999999999999999999",
        ] {
            let err = AuthConfig::from_lookup(lookup(&[(SECRET_VAR, "s3cr3t"), (VALIDITY_VAR, bad)]))
                .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { name: VALIDITY_VAR, .. }), "{bad}");
        }
    }

    #[test]
    fn largest_accepted_validity_still_issues_tokens() {
        let max = MAX_VALIDITY_SECS.to_string();
        let cfg = AuthConfig::from_lookup(lookup(&[(SECRET_VAR, "s3cr3t"), (VALIDITY_VAR, max.as_str())]))
            .unwrap();

        let codec = crate::TokenCodec::new(&cfg.signing_key, cfg.token_validity).unwrap();
        let principal = crate::Principal::new("alice", [crate::Role::USER]).unwrap();
        assert!(codec.encode(&principal, chrono::Utc::now()).is_ok());
    }

    #[test]
    fn debug_output_hides_secret() {
        let cfg = AuthConfig::from_lookup(lookup(&[(SECRET_VAR, "do-not-print-me")])).unwrap();
        assert!(!format!("{cfg:?}").contains("do-not-print-me"));
    }
}
