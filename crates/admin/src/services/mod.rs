//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Login/logout against the Hadawi API and session identity

pub mod auth;

pub use auth::{AdminAuthError, AdminAuthService, clear_current_admin, current_admin, is_authenticated};
