//! Request-scoped context for guarded admin pages.
//!
//! [`AdminPage`] bundles what every shell page needs: the authenticated
//! admin, a translator for the request's language, and the session for
//! reading and updating navigation state.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::i18n::Translator;
use crate::middleware::auth::{AdminAuthRejection, RequireAdminAuth};
use crate::middleware::locale::Locale;
use crate::models::{CurrentAdmin, session_keys};
use crate::navigation::{NavState, ShellView};
use crate::state::AppState;

/// Extractor for guarded pages rendered inside the navigation shell.
///
/// Rejects exactly like [`RequireAdminAuth`], so a handler taking it never
/// runs for a logged-out browser.
pub struct AdminPage {
    pub admin: CurrentAdmin,
    pub t: Translator,
    pub session: Session,
    return_to: String,
}

impl FromRequestParts<AppState> for AdminPage {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAdminAuth(admin) = RequireAdminAuth::from_request_parts(parts, state).await?;
        let Ok(Locale(t)) = Locale::from_request_parts(parts, state).await;
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        let return_to = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path().to_owned(), ToString::to_string);

        Ok(Self {
            admin,
            t,
            session,
            return_to,
        })
    }
}

impl AdminPage {
    /// Build the shell for a page belonging to menu path `nav_path`.
    ///
    /// Records the render, which closes the mobile sidebar unless this page
    /// is the redirect target of a sidebar toggle.
    pub async fn shell(&self, nav_path: &str) -> ShellView {
        let mut nav = load_nav(&self.session).await;
        if nav.render_page() {
            save_nav(&self.session, &nav).await;
        }
        ShellView::build(&self.t, &self.admin, &nav, nav_path, &self.return_to)
    }
}

/// Navigation state stored in the session, or the initial state.
pub async fn load_nav(session: &Session) -> NavState {
    match session.get::<NavState>(session_keys::NAV).await {
        Ok(nav) => nav.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read navigation state, resetting");
            NavState::default()
        }
    }
}

/// Persist navigation state; failures only cost the admin their toggles.
pub async fn save_nav(session: &Session, nav: &NavState) {
    if let Err(e) = session.insert(session_keys::NAV, nav).await {
        tracing::warn!(error = %e, "Failed to save navigation state");
    }
}
