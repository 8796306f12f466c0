use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Principal;

/// Identity of one inbound request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// Request-scoped slot holding the current request's principal, if any.
///
/// One value per inbound request, owned by that request and passed down the
/// call chain explicitly. There is no global or thread-bound instance, so
/// concurrent requests cannot observe each other's identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityContext {
    request_id: RequestId,
    principal: Option<Principal>,
}

impl IdentityContext {
    /// Anonymous context for a fresh request.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_request(request_id: RequestId) -> Self {
        Self {
            request_id,
            principal: None,
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Install the authenticated principal. A second call overwrites the first.
    pub fn set(&mut self, principal: Principal) {
        if let Some(previous) = &self.principal {
            tracing::debug!(
                request_id = %self.request_id,
                previous = previous.username(),
                next = principal.username(),
                "overwriting request identity"
            );
        }
        self.principal = Some(principal);
    }

    pub fn current(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn current_username(&self) -> Option<&str> {
        self.principal.as_ref().map(Principal::username)
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}
