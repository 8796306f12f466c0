//! Host-level settings (listener address, user seed file).

use std::net::SocketAddr;
use std::path::PathBuf;

use warden_auth::{AuthConfig, ConfigError};

pub const BIND_ADDR_VAR: &str = "WARDEN_BIND_ADDR";
pub const USERS_FILE_VAR: &str = "WARDEN_USERS_FILE";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub users_file: Option<PathBuf>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            name: BIND_ADDR_VAR,
            reason: e.to_string(),
        })?;

        let users_file = lookup(USERS_FILE_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            users_file,
            auth: AuthConfig::from_lookup(&lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let cfg = ApiConfig::from_lookup(|name| {
            (name == warden_auth::config::SECRET_VAR).then(|| "s3cr3t".to_string())
        })
        .unwrap();

        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert!(cfg.users_file.is_none());
    }

    #[test]
    fn bad_bind_addr_is_rejected() {
        let err = ApiConfig::from_lookup(|name| match name {
            BIND_ADDR_VAR => Some("not-an-address".to_string()),
            _ => Some("s3cr3t".to_string()),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: BIND_ADDR_VAR, .. }));
    }

    #[test]
    fn missing_secret_is_reported() {
        let err = ApiConfig::from_lookup(|_| None).unwrap_err();
        assert_eq!(err, ConfigError::Missing(warden_auth::config::SECRET_VAR));
    }
}
