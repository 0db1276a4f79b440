//! Admin settings routes.
//!
//! Shows the signed-in profile as the API reported it and lets the admin
//! pick the interface language. Profile data is owned by the Hadawi API and
//! is read-only here.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use tracing::instrument;

use hadawi_core::Language;

use crate::filters;
use crate::i18n::Translator;
use crate::middleware::AdminPage;
use crate::models::CurrentAdmin;
use crate::navigation::ShellView;
use crate::state::AppState;

use super::{Alert, AlertParams};

// =============================================================================
// Templates
// =============================================================================

/// Profile block on the settings page.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub role: String,
    pub session_expires: String,
}

impl ProfileView {
    fn build(t: &Translator, admin: &CurrentAdmin) -> Self {
        let not_set = || t.t("settings-not-set");
        Self {
            name: admin.name.clone().unwrap_or_else(not_set),
            email: admin
                .email
                .as_ref()
                .map_or_else(not_set, ToString::to_string),
            role: admin.role.as_ref().map_or_else(not_set, |role| {
                role.label_key()
                    .map_or_else(|| role.to_string(), |key| t.t(key))
            }),
            session_expires: admin.expires_at.map_or_else(
                || t.t("settings-session-no-expiry"),
                |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
            ),
        }
    }
}

/// A language the admin can switch to.
#[derive(Debug, Clone)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub current: bool,
}

fn language_options(active: Language) -> Vec<LanguageOption> {
    Language::ALL
        .into_iter()
        .map(|language| LanguageOption {
            code: language.code(),
            name: language.native_name(),
            current: language == active,
        })
        .collect()
}

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub t: Translator,
    pub shell: ShellView,
    pub profile: ProfileView,
    pub languages: Vec<LanguageOption>,
    pub api_endpoint: String,
    pub alert: Option<Alert>,
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/settings", get(settings_page))
}

/// Render the settings page.
///
/// GET /settings
#[instrument(skip_all)]
async fn settings_page(
    page: AdminPage,
    State(state): State<AppState>,
    Query(params): Query<AlertParams>,
) -> SettingsTemplate {
    let profile = ProfileView::build(&page.t, &page.admin);
    let alert = Alert::from_params(&page.t, &params);
    let languages = language_options(page.t.language());
    let shell = page.shell("/settings").await;

    SettingsTemplate {
        t: page.t,
        shell,
        profile,
        languages,
        api_endpoint: state.config().api.base_url.to_string(),
        alert,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::hadawi::AccessToken;
    use crate::i18n::Catalog;
    use hadawi_core::{AdminRole, Email};

    #[test]
    fn test_profile_view_fallbacks() {
        let t = Translator::new(Arc::new(Catalog::load().unwrap()), Language::En);
        let admin = CurrentAdmin {
            token: AccessToken::new("t".to_string()),
            name: None,
            email: Some(Email::parse("ops@hadawi.app").unwrap()),
            role: Some(AdminRole::SuperAdmin),
            expires_at: None,
        };
        let profile = ProfileView::build(&t, &admin);
        assert_eq!(profile.name, "Not set");
        assert_eq!(profile.email, "ops@hadawi.app");
        assert_eq!(profile.role, t.t("role-super-admin"));
        assert_eq!(profile.session_expires, "When you sign out");

        let admin = CurrentAdmin {
            expires_at: Some(chrono::Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()),
            ..admin
        };
        assert_eq!(
            ProfileView::build(&t, &admin).session_expires,
            "2026-03-01 09:30 UTC"
        );
    }

    #[test]
    fn test_language_options_mark_active() {
        let options = language_options(Language::Ar);
        let current: Vec<_> = options.iter().filter(|o| o.current).map(|o| o.code).collect();
        assert_eq!(current, vec!["ar"]);
        assert_eq!(options.len(), Language::ALL.len());
    }
}
