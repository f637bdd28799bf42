//! Shared types, errors, and configuration for the desa portal.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe record references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - Admin auth claims and JWT handling

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;


pub use auth::Claims;
pub use config::{AppConfig, CaptchaConfig, LetterheadConfig};
pub use error::{AppError, AppResult, FieldErrors};
pub use jwt::{JwtConfig, JwtError, JwtService};
