//! `warden-core` — leaf building blocks shared by the auth and host crates.
//!
//! Nothing here performs IO: the clock is injectable and key material is
//! provisioned by the caller.

pub mod clock;
pub mod error;
pub mod id;
pub mod key;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::DomainError;
pub use id::UserId;
pub use key::SigningKey;
