//! Authentication middleware and extractors for admin.
//!
//! Provides extractors for requiring admin authentication in route handlers,
//! and the layer that drops the identity once the API rejects its token.

use axum::{
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::CurrentAdmin;
use crate::services::auth::{clear_current_admin, current_admin};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Extractor that requires admin authentication.
///
/// If the admin is not logged in (or the stored identity has expired), the
/// handler never runs: page requests are redirected to the login page and
/// sidebar fragment requests get 401 Unauthorized (the script then reloads).
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {:?}!", admin.display_name())
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required but the user is not logged in.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// Redirect to login page (for full page requests).
    RedirectToLogin,
    /// Unauthorized response (for fragment requests).
    Unauthorized,
}

impl AdminAuthRejection {
    fn for_request(parts: &Parts) -> Self {
        let fragment = parts
            .headers
            .get("hx-request")
            .is_some_and(|v| v.as_bytes() == b"true");
        if fragment {
            Self::Unauthorized
        } else {
            Self::RedirectToLogin
        }
    }
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        match current_admin(session).await {
            Ok(Some(admin)) => Ok(Self(admin)),
            Ok(None) => Err(AdminAuthRejection::for_request(parts)),
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed, treating as logged out");
                Err(AdminAuthRejection::for_request(parts))
            }
        }
    }
}

/// Extractor that optionally gets the current admin.
///
/// Unlike `RequireAdminAuth`, this does not reject the request if the admin is not logged in.
pub struct OptionalAdminAuth(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdminAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = match parts.extensions.get::<Session>() {
            Some(session) => current_admin(session).await.ok().flatten(),
            None => None,
        };

        Ok(Self(admin))
    }
}

/// Response extension marking that the API rejected the session's token.
#[derive(Debug, Clone, Copy)]
pub struct TokenRejected;

/// Clear the session identity when a handler reports [`TokenRejected`].
///
/// Handlers cannot always reach the session from their error path; they
/// attach the marker and this layer performs the removal before the
/// response (a redirect to login) leaves the server.
pub async fn revoke_rejected_token(session: Session, request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    if response.extensions().get::<TokenRejected>().is_some() {
        tracing::info!("API rejected the admin token, clearing session");
        if let Err(e) = clear_current_admin(&session).await {
            tracing::error!(error = %e, "Failed to clear rejected admin session");
        }
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parts(fragment: bool) -> Parts {
        let mut builder = axum::http::Request::builder().uri("/nav/groups/catalog");
        if fragment {
            builder = builder.header("HX-Request", "true");
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_rejection_depends_on_request_kind() {
        assert!(matches!(
            AdminAuthRejection::for_request(&parts(true)),
            AdminAuthRejection::Unauthorized
        ));
        assert!(matches!(
            AdminAuthRejection::for_request(&parts(false)),
            AdminAuthRejection::RedirectToLogin
        ));
    }

    #[test]
    fn test_redirect_targets_login() {
        let response = AdminAuthRejection::RedirectToLogin.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], LOGIN_PATH);
    }
}
