//! Email/password sessions against the hosted backend's auth service

pub mod client;
pub mod session;

pub use client::{AuthClient, SignUpOutcome, build_http_client};
pub use session::AuthSession;
