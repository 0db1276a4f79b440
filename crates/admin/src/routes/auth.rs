//! Admin authentication routes.
//!
//! Credentials are exchanged for a Hadawi API token; the admin panel never
//! stores passwords.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::i18n::Translator;
use crate::middleware::{LOGIN_PATH, Locale, OptionalAdminAuth};
use crate::services::{AdminAuthError, AdminAuthService};
use crate::state::AppState;

use super::HOME_PATH;

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub t: Translator,
    pub lang: &'static str,
    pub dir: &'static str,
    /// Email to prefill after a failed attempt.
    pub email: String,
    pub error: Option<String>,
    pub notice: Option<String>,
    /// Native name of the language the toggle switches to.
    pub toggle_label: &'static str,
}

impl LoginTemplate {
    fn new(t: Translator, email: &str) -> Self {
        let language = t.language();
        Self {
            lang: language.code(),
            dir: language.direction().as_str(),
            toggle_label: language.toggled().native_name(),
            email: email.to_owned(),
            error: None,
            notice: None,
            t,
        }
    }

    fn with_error(mut self, key: &str) -> Self {
        self.error = Some(self.t.t(key));
        self
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/logout", post(logout))
}

// =============================================================================
// Request Types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Set when a page found the API token expired.
    pub expired: Option<String>,
}

/// Submitted login form. Deliberately not `Debug`.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
///
/// GET /login
#[instrument(skip_all)]
async fn login_page(
    OptionalAdminAuth(admin): OptionalAdminAuth,
    Locale(t): Locale,
    Query(query): Query<LoginQuery>,
) -> Response {
    if admin.is_some() {
        return Redirect::to(HOME_PATH).into_response();
    }

    let mut template = LoginTemplate::new(t, "");
    if query.expired.is_some() {
        template.notice = Some(template.t.t("login-session-expired"));
    }
    template.into_response()
}

/// Log in with email and password.
///
/// POST /login
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Locale(t): Locale,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        let template = LoginTemplate::new(t, email).with_error("login-error-missing");
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
    }

    let password = SecretString::from(form.password);
    match AdminAuthService::new(state.hadawi())
        .login(&session, email, &password)
        .await
    {
        Ok(admin) => {
            set_sentry_user(&admin);
            Ok(Redirect::to(HOME_PATH).into_response())
        }
        Err(AdminAuthError::Session(e)) => Err(AppError::Session(e)),
        Err(e) => {
            let status = match e {
                AdminAuthError::Network(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::UNAUTHORIZED,
            };
            tracing::warn!(error = %e, "Admin login failed");
            let template = LoginTemplate::new(t, email).with_error(e.message_key());
            Ok((status, template).into_response())
        }
    }
}

/// Log out and return to the login page.
///
/// POST /logout
#[instrument(skip_all)]
async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect, AppError> {
    AdminAuthService::new(state.hadawi()).logout(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to(LOGIN_PATH))
}
