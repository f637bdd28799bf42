//! Middleware components.

pub mod auth;

pub use auth::{AuthUser, auth_middleware};
