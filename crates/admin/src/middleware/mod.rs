//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded into the span)
//! 4. Security headers
//! 5. Session layer (tower-sessions, in-memory store, signed cookie)
//! 6. Token revocation (clears identities the API rejected)
//!
//! Authentication is enforced per handler with the [`RequireAdminAuth`] and
//! [`AdminPage`] extractors rather than a blanket layer, so public routes
//! need no allow-list.

pub mod auth;
pub mod context;
pub mod locale;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    AdminAuthRejection, LOGIN_PATH, OptionalAdminAuth, RequireAdminAuth, TokenRejected,
    revoke_rejected_token,
};
pub use context::{AdminPage, load_nav, save_nav};
pub use locale::{Locale, store_language};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
