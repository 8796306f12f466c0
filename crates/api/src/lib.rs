//! HTTP host layer: ingestion middleware, login endpoint and role-gated routes
//! on top of `warden-auth`.

pub mod app;
pub mod authz;
pub mod config;
pub mod middleware;
