//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication, language and navigation
//! state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hadawi_core::{AdminRole, Email};

use crate::hadawi::{AccessToken, LoginResponse};

/// Session-stored admin identity.
///
/// Created from the login response; the token is what authorizes every API
/// call made on the admin's behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Bearer token for the Hadawi API.
    pub token: AccessToken,
    /// Admin's display name, when the API provides one.
    pub name: Option<String>,
    /// Admin's email address.
    pub email: Option<Email>,
    /// Admin's role/permission level.
    pub role: Option<AdminRole>,
    /// When the token stops being valid, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl CurrentAdmin {
    /// Build the session identity from a login response.
    ///
    /// The email the admin typed is used when the API omits it. Blank names
    /// and roles count as missing.
    #[must_use]
    pub fn from_login(response: LoginResponse, login_email: &Email, now: DateTime<Utc>) -> Self {
        let expires_at = response.expires_at(now);
        let profile = response.admin;
        Self {
            token: response.token,
            name: profile.name.filter(|n| !n.trim().is_empty()),
            email: profile.email.or_else(|| Some(login_email.clone())),
            role: profile.role.filter(|r| !r.as_str().trim().is_empty()),
            expires_at,
        }
    }

    /// Whether the token has passed its expiry instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Name to show in the shell: display name, then email.
    ///
    /// `None` means the caller should use a generic translated label.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        self.name
            .clone()
            .or_else(|| self.email.as_ref().map(ToString::to_string))
    }
}

/// Session keys for admin data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the chosen UI language.
    pub const LANGUAGE: &str = "language";

    /// Key for sidebar and menu group state.
    pub const NAV: &str = "nav";
}
