use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod system;
pub mod users;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/authenticate", post(auth::authenticate))
        .route("/user", get(users::current_user))
        .route("/user/:username", get(users::user_by_name))
}
