//! Process-wide signing key material.

use std::fmt;
use std::sync::Arc;

use crate::error::DomainError;

/// Symmetric secret used to sign and verify tokens.
///
/// Read-only after construction and cheap to clone (shared buffer).
/// `Debug` and `Display` never print key bytes.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Arc<[u8]>,
}

impl SigningKey {
    /// Minimum length below which a warning is worth emitting (HS256 block size).
    pub const RECOMMENDED_LEN: usize = 32;

    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, DomainError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(DomainError::validation("signing key must not be empty"));
        }
        Ok(Self { bytes: bytes.into() })
    }

    pub fn expose_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_short(&self) -> bool {
        self.len() < Self::RECOMMENDED_LEN
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
