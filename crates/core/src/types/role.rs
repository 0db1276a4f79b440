//! Admin role as reported by the Hadawi API.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Permission level of a signed-in admin.
///
/// The Hadawi API reports roles as free-form strings. Known roles map to
/// dedicated variants; anything else is kept verbatim in [`AdminRole::Other`]
/// so the navigation footer can still show it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AdminRole {
    /// Full access including admin account management.
    SuperAdmin,
    /// Full access to platform data.
    Admin,
    /// Can review and moderate content but not configure the platform.
    Moderator,
    /// A role this build does not know about.
    Other(String),
}

impl AdminRole {
    /// Returns the wire value for this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Other(raw) => raw,
        }
    }

    /// Translation key for the role's display label, if it has one.
    #[must_use]
    pub const fn label_key(&self) -> Option<&'static str> {
        match self {
            Self::SuperAdmin => Some("role-super-admin"),
            Self::Admin => Some("role-admin"),
            Self::Moderator => Some("role-moderator"),
            Self::Other(_) => None,
        }
    }
}

impl From<String> for AdminRole {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "super_admin" | "superadmin" => Self::SuperAdmin,
            "admin" => Self::Admin,
            "moderator" => Self::Moderator,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for AdminRole {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<AdminRole> for String {
    fn from(role: AdminRole) -> Self {
        match role {
            AdminRole::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
