//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings the Hadawi API)
//! GET  /                           - Redirect to /dashboard
//!
//! # Auth
//! GET  /login                      - Login page
//! POST /login                      - Exchange credentials for an API token
//! POST /logout                     - Logout
//!
//! # Shell
//! POST /language/toggle            - Switch to the other language
//! POST /language/{code}            - Switch to a specific language
//! POST /nav/sidebar                - Toggle the mobile sidebar
//! POST /nav/sidebar/close          - Close the mobile sidebar (overlay)
//! POST /nav/groups/{group}         - Expand or collapse a menu group
//!
//! # Pages
//! GET  /dashboard                  - Statistics overview
//! GET  /analytics                  - Full statistics and balance breakdown
//! GET  /settings                   - Profile, language and API details
//!
//! # Resources (users, occasions, payments, ...)
//! GET  /{slug}                     - List (?q= search, ?page= pagination)
//! GET  /{slug}/new                 - New record form
//! POST /{slug}                     - Create record
//! GET  /{slug}/{id}                - Record detail
//! GET  /{slug}/{id}/edit           - Edit form
//! POST /{slug}/{id}                - Update record
//! POST /{slug}/{id}/delete         - Delete record
//! ```

use axum::{Router, response::Redirect, routing::get};
use serde::Deserialize;

use crate::i18n::Translator;
use crate::state::AppState;

pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod resources;
pub mod settings;
pub mod shell;

/// Where the panel lands after login and for bad return paths.
pub const HOME_PATH: &str = "/dashboard";

/// Build the page router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(HOME_PATH) }))
        .merge(health::router())
        .merge(auth::router())
        .merge(shell::router())
        .merge(dashboard::router())
        .merge(analytics::router())
        .merge(settings::router())
        // Catch-all slugs last so every static path above wins.
        .merge(resources::router())
}

// =============================================================================
// Alerts
// =============================================================================

/// Outcome flags carried through a redirect after a mutation.
#[derive(Debug, Default, Deserialize)]
pub struct AlertParams {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// A banner shown above page content.
#[derive(Debug, Clone)]
pub struct Alert {
    /// `success` or `error`; used as a CSS modifier.
    pub kind: &'static str,
    pub message: String,
}

impl Alert {
    #[must_use]
    pub const fn success(message: String) -> Self {
        Self {
            kind: "success",
            message,
        }
    }

    #[must_use]
    pub const fn error(message: String) -> Self {
        Self {
            kind: "error",
            message,
        }
    }

    /// Translate redirect flags into a banner. Unknown values are ignored.
    #[must_use]
    pub fn from_params(t: &Translator, params: &AlertParams) -> Option<Self> {
        if let Some(error) = params.error.as_deref() {
            let key = match error {
                "load" => "alert-load-failed",
                "save" => "alert-save-failed",
                "delete" => "alert-delete-failed",
                _ => return None,
            };
            return Some(Self::error(t.t(key)));
        }

        let key = match params.success.as_deref()? {
            "created" => "alert-created",
            "updated" => "alert-updated",
            "deleted" => "alert-deleted",
            "language" => "alert-language-changed",
            _ => return None,
        };
        Some(Self::success(t.t(key)))
    }
}

// =============================================================================
// Return paths
// =============================================================================

/// Accept only same-origin absolute paths; anything else goes home.
///
/// Rejects scheme-relative (`//host`) and backslash forms that browsers
/// normalise into another origin. Request URIs are percent-encoded, so a
/// genuine return path is always visible ASCII and a valid `Location`.
#[must_use]
pub fn safe_return_path(candidate: Option<&str>) -> String {
    match candidate.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && path.bytes().all(|b| b.is_ascii_graphic()) =>
        {
            path.to_owned()
        }
        _ => HOME_PATH.to_owned(),
    }
}
