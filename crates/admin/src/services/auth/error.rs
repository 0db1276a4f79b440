//! Admin authentication error types.

use thiserror::Error;

use crate::hadawi::HadawiError;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] hadawi_core::EmailError),

    /// The API rejected the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The API could not be reached or answered unexpectedly.
    #[error("authentication service unavailable: {0}")]
    Network(HadawiError),

    /// Reading or writing the session failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl From<HadawiError> for AdminAuthError {
    fn from(err: HadawiError) -> Self {
        match err {
            HadawiError::Unauthorized(_) | HadawiError::Validation(_) => Self::InvalidCredentials,
            other => Self::Network(other),
        }
    }
}

impl AdminAuthError {
    /// Translation key for the message shown on the login page.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) | Self::InvalidCredentials => "login-error-invalid",
            Self::Network(_) => "login-error-network",
            Self::Session(_) => "error-generic",
        }
    }
}
