//! Navigation shell actions: language switching and sidebar toggles.
//!
//! Every action is a small form POST that redirects back to the page it came
//! from. Requests sent with `HX-Request: true` get the re-rendered sidebar
//! fragment instead so the page can swap it in place.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::Path,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    routing::post,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use hadawi_core::Language;

use crate::error::AppError;
use crate::i18n::Translator;
use crate::middleware::{AdminPage, Locale, load_nav, save_nav, store_language};
use crate::navigation::{MenuGroup, NavState, ShellView, nav_path_for};
use crate::state::AppState;

use super::safe_return_path;

/// Sidebar fragment returned to fragment-swapping requests.
#[derive(Template, WebTemplate)]
#[template(path = "partials/sidebar.html")]
pub struct SidebarTemplate {
    pub t: Translator,
    pub shell: ShellView,
}

/// Build the shell router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/language/toggle", post(toggle_language))
        .route("/language/{code}", post(set_language))
        .route("/nav/sidebar", post(toggle_sidebar))
        .route("/nav/sidebar/close", post(close_sidebar))
        .route("/nav/groups/{group}", post(toggle_group))
}

/// Hidden `return_to` field every shell form carries.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnForm {
    pub return_to: Option<String>,
}

fn wants_fragment(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

// =============================================================================
// Language
// =============================================================================

/// Flip between the two supported languages.
///
/// POST /language/toggle
///
/// Available before login so the login page can be switched too.
#[instrument(skip_all)]
async fn toggle_language(
    session: Session,
    Locale(t): Locale,
    Form(form): Form<ReturnForm>,
) -> Result<Redirect, AppError> {
    let language = t.language().toggled();
    store_language(&session, language).await?;
    tracing::debug!(language = %language, "Language toggled");
    Ok(Redirect::to(&safe_return_path(form.return_to.as_deref())))
}

/// Switch to a specific language.
///
/// POST /language/{code}
#[instrument(skip(session, form))]
async fn set_language(
    session: Session,
    Path(code): Path<String>,
    Form(form): Form<ReturnForm>,
) -> Result<Redirect, AppError> {
    let language = Language::parse(&code).map_err(|e| AppError::BadRequest(e.to_string()))?;
    store_language(&session, language).await?;
    Ok(Redirect::to(&safe_return_path(form.return_to.as_deref())))
}

// =============================================================================
// Sidebar
// =============================================================================

/// Toggle the mobile sidebar.
///
/// POST /nav/sidebar
#[instrument(skip_all)]
async fn toggle_sidebar(
    page: AdminPage,
    headers: HeaderMap,
    Form(form): Form<ReturnForm>,
) -> Response {
    update_nav(page, &headers, form, NavState::toggle_sidebar).await
}

/// Close the mobile sidebar from the overlay.
///
/// POST /nav/sidebar/close
#[instrument(skip_all)]
async fn close_sidebar(
    page: AdminPage,
    headers: HeaderMap,
    Form(form): Form<ReturnForm>,
) -> Response {
    update_nav(page, &headers, form, NavState::close_sidebar).await
}

/// Expand or collapse one menu group; other groups are untouched.
///
/// POST /nav/groups/{group}
#[instrument(skip(page, headers, form))]
async fn toggle_group(
    page: AdminPage,
    headers: HeaderMap,
    Path(group): Path<String>,
    Form(form): Form<ReturnForm>,
) -> Result<Response, AppError> {
    let group = MenuGroup::from_key(&group)
        .ok_or_else(|| AppError::NotFound(format!("menu group '{group}'")))?;
    Ok(update_nav(page, &headers, form, |nav| nav.toggle_group(group)).await)
}

async fn update_nav(
    page: AdminPage,
    headers: &HeaderMap,
    form: ReturnForm,
    change: impl FnOnce(&mut NavState),
) -> Response {
    let fragment = wants_fragment(headers);
    let mut nav = load_nav(&page.session).await;
    change(&mut nav);
    if !fragment {
        nav.hold_sidebar_once();
    }
    save_nav(&page.session, &nav).await;

    let return_to = safe_return_path(form.return_to.as_deref());
    if !fragment {
        return Redirect::to(&return_to).into_response();
    }

    let path = return_to.split(['?', '#']).next().unwrap_or(&return_to);
    let shell = ShellView::build(&page.t, &page.admin, &nav, &nav_path_for(path), &return_to);
    SidebarTemplate { t: page.t, shell }.into_response()
}
