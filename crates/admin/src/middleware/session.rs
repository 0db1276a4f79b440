//! Session middleware configuration for admin.
//!
//! Sessions live in process memory and are referenced by a signed cookie
//! with strict settings (SameSite=Strict, HTTP-only, 24hr inactivity expiry).
//! A restart logs every admin out.

use secrecy::ExposeSecret;
use sha2::{Digest, Sha512};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::Key};

use crate::config::AdminConfig;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "hadawi_admin_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// The cookie signing key is derived from `ADMIN_SESSION_SECRET`, so cookies
/// stay valid across processes sharing the secret (the sessions themselves
/// do not).
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let digest = Sha512::digest(config.session_secret.expose_secret().as_bytes());
    let key = Key::from(digest.as_slice());

    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        // SameSite=Strict for admin
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}
