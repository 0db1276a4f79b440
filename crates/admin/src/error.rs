//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::hadawi::HadawiError;
use crate::middleware::{LOGIN_PATH, TokenRejected};
use crate::models::CurrentAdmin;
use crate::services::AdminAuthError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Hadawi API operation failed.
    #[error("Hadawi error: {0}")]
    Hadawi(#[from] HadawiError),

    /// Authentication flow failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AdminAuthError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // An expired or revoked token ends the session rather than erroring.
        if matches!(self, Self::Hadawi(HadawiError::Unauthorized(_))) {
            let mut response =
                Redirect::to(&format!("{LOGIN_PATH}?expired=1")).into_response();
            response.extensions_mut().insert(TokenRejected);
            return response;
        }

        let status = match &self {
            Self::Hadawi(HadawiError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Hadawi(HadawiError::Forbidden(_)) => StatusCode::FORBIDDEN,
            Self::Hadawi(HadawiError::Validation(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Hadawi(_) | Self::Auth(AdminAuthError::Network(_)) => StatusCode::BAD_GATEWAY,
            Self::Auth(_) | Self::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Hadawi(HadawiError::NotFound(_)) => "Not found".to_string(),
            Self::Hadawi(HadawiError::Forbidden(_)) => "Forbidden".to_string(),
            _ if status == StatusCode::BAD_GATEWAY => "External service error".to_string(),
            _ if status.is_server_error() => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Set the Sentry user context from the logged-in admin.
pub fn set_sentry_user(admin: &CurrentAdmin) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: admin.email.as_ref().map(ToString::to_string),
            username: admin.name.clone(),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
