//! Admin authentication service.
//!
//! The session is the single source of truth for who is logged in. Login
//! trades credentials for an API token at the Hadawi API and stores the
//! resulting [`CurrentAdmin`]; logout revokes the token (best-effort) and
//! always clears the local identity.

mod error;

pub use error::AdminAuthError;

use chrono::Utc;
use secrecy::SecretString;
use tower_sessions::Session;
use tracing::instrument;

use hadawi_core::Email;

use crate::hadawi::HadawiClient;
use crate::models::{CurrentAdmin, session_keys};

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    client: &'a HadawiClient,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(client: &'a HadawiClient) -> Self {
        Self { client }
    }

    /// Log an admin in and store the identity in the session.
    ///
    /// The session id is cycled before the identity is written so a
    /// pre-login session id can never be reused.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidCredentials` if the API rejects the
    /// credentials, `AdminAuthError::Network` if it cannot be reached.
    #[instrument(skip(self, session, password))]
    pub async fn login(
        &self,
        session: &Session,
        email: &str,
        password: &SecretString,
    ) -> Result<CurrentAdmin, AdminAuthError> {
        let email = Email::parse(email)?;
        let response = self.client.login(&email, password).await?;
        let admin = CurrentAdmin::from_login(response, &email, Utc::now());

        session.cycle_id().await?;
        session.insert(session_keys::CURRENT_ADMIN, &admin).await?;

        tracing::info!(email = %email, "Admin logged in");
        Ok(admin)
    }

    /// Log the current admin out.
    ///
    /// The remote logout is best-effort; the local identity is removed even
    /// when the API call fails. Language and navigation state survive.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::Session` if the session cannot be modified.
    #[instrument(skip_all)]
    pub async fn logout(&self, session: &Session) -> Result<(), AdminAuthError> {
        if let Some(admin) = current_admin(session).await?
            && let Err(e) = self.client.logout(&admin.token).await
        {
            tracing::warn!(error = %e, "Remote logout failed, clearing session anyway");
        }

        clear_current_admin(session).await?;
        tracing::info!("Admin logged out");
        Ok(())
    }
}

/// The logged-in admin, if any.
///
/// An expired identity is removed from the session and reported as absent.
///
/// # Errors
///
/// Returns `AdminAuthError::Session` if the session store fails.
pub async fn current_admin(session: &Session) -> Result<Option<CurrentAdmin>, AdminAuthError> {
    let Some(admin) = session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?
    else {
        return Ok(None);
    };

    if admin.is_expired(Utc::now()) {
        tracing::info!("Admin session expired");
        clear_current_admin(session).await?;
        return Ok(None);
    }

    Ok(Some(admin))
}

/// Whether a valid admin identity is in the session.
pub async fn is_authenticated(session: &Session) -> bool {
    matches!(current_admin(session).await, Ok(Some(_)))
}

/// Remove the admin identity from the session.
///
/// # Errors
///
/// Returns `AdminAuthError::Session` if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), AdminAuthError> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Duration as ChronoDuration;
    use tower_sessions::MemoryStore;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::HadawiApiConfig;
    use crate::hadawi::AccessToken;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn client(server: &MockServer) -> HadawiClient {
        HadawiClient::new(&HadawiApiConfig {
            base_url: Url::parse(&format!("{}/", server.uri())).unwrap(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn password() -> SecretString {
        SecretString::from("correct horse".to_string())
    }

    #[tokio::test]
    async fn test_login_stores_identity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "noura@hadawi.app",
                "password": "correct horse"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "tok-1",
                "admin": { "name": "Noura", "role": "super_admin" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let session = session();
        let admin = AdminAuthService::new(&client)
            .login(&session, " noura@Hadawi.APP ", &password())
            .await
            .unwrap();

        assert_eq!(admin.name.as_deref(), Some("Noura"));
        assert!(is_authenticated(&session).await);
        let stored = current_admin(&session).await.unwrap().unwrap();
        assert_eq!(stored.token.expose(), "tok-1");
    }

    #[tokio::test]
    async fn test_login_rejected_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({ "message": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        let session = session();
        let err = AdminAuthService::new(&client)
            .login(&session, "noura@hadawi.app", &password())
            .await
            .unwrap_err();

        assert!(matches!(err, AdminAuthError::InvalidCredentials));
        assert_eq!(err.message_key(), "login-error-invalid");
        assert!(!is_authenticated(&session).await);
    }

    #[tokio::test]
    async fn test_login_server_failure_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/auth/login"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client(&server);
        let err = AdminAuthService::new(&client)
            .login(&session(), "noura@hadawi.app", &password())
            .await
            .unwrap_err();
        assert!(matches!(err, AdminAuthError::Network(_)));
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_if_remote_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/auth/logout"))
            .and(header("authorization", "Bearer tok-2"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let session = session();
        session
            .insert(
                session_keys::CURRENT_ADMIN,
                CurrentAdmin {
                    token: AccessToken::new("tok-2".to_string()),
                    name: None,
                    email: None,
                    role: None,
                    expires_at: None,
                },
            )
            .await
            .unwrap();
        session.insert(session_keys::LANGUAGE, "ar").await.unwrap();

        let client = client(&server);
        AdminAuthService::new(&client).logout(&session).await.unwrap();

        assert!(!is_authenticated(&session).await);
        let language: Option<String> = session.get(session_keys::LANGUAGE).await.unwrap();
        assert_eq!(language.as_deref(), Some("ar"));
    }

    #[tokio::test]
    async fn test_expired_identity_is_removed() {
        let session = session();
        session
            .insert(
                session_keys::CURRENT_ADMIN,
                CurrentAdmin {
                    token: AccessToken::new("old".to_string()),
                    name: None,
                    email: None,
                    role: None,
                    expires_at: Some(Utc::now() - ChronoDuration::minutes(1)),
                },
            )
            .await
            .unwrap();

        assert!(current_admin(&session).await.unwrap().is_none());
        let raw: Option<serde_json::Value> =
            session.get(session_keys::CURRENT_ADMIN).await.unwrap();
        assert!(raw.is_none());
    }
}
