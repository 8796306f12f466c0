use serde::{Deserialize, Serialize};

use warden_auth::{Credentials, UserRecord};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(value: LoginRequest) -> Self {
        Credentials::new(value.username, value.password)
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Public view of a directory record (never includes the password hash).
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub roles: Vec<String>,
    pub activated: bool,
}

impl From<UserRecord> for UserResponse {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id.to_string(),
            username: value.username,
            roles: value.roles.iter().map(|r| r.as_str().to_string()).collect(),
            activated: value.activated,
        }
    }
}
