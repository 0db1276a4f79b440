//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, routing::get};
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::hadawi::{Figure, HadawiError};
use crate::i18n::Translator;
use crate::middleware::AdminPage;
use crate::models::Resource;
use crate::navigation::{ShellView, icon_for};
use crate::state::AppState;

/// Resources linked from the dashboard shortcut grid.
const SHORTCUTS: [Resource; 6] = [
    Resource::Users,
    Resource::Occasions,
    Resource::Payments,
    Resource::Withdrawals,
    Resource::PromoCodes,
    Resource::Notifications,
];

// =============================================================================
// View Types
// =============================================================================

/// A labelled figure.
#[derive(Debug, Clone)]
pub struct FigureView {
    pub label: String,
    pub value: String,
}

/// A block of figures that loads, or fails, on its own.
#[derive(Debug, Clone, Default)]
pub struct FigurePanel {
    pub figures: Vec<FigureView>,
    /// Inline error shown instead of the figures.
    pub error: Option<String>,
}

impl FigurePanel {
    /// Turn an API result into a panel.
    ///
    /// A rejected token ends the request (the caller is sent to login); any
    /// other failure only blanks this panel.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Hadawi` when the API rejected the session's token.
    pub fn load(
        t: &Translator,
        panel: &'static str,
        result: Result<Vec<Figure>, HadawiError>,
    ) -> Result<Self, AppError> {
        match result {
            Ok(figures) => Ok(Self {
                figures: figures
                    .into_iter()
                    .map(|figure| FigureView {
                        label: t.label("stat", &figure.key),
                        value: figure.value,
                    })
                    .collect(),
                error: None,
            }),
            Err(e) if e.is_unauthorized() => Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, panel, "Failed to load figures");
                Ok(Self {
                    figures: Vec::new(),
                    error: Some(t.t("alert-load-failed")),
                })
            }
        }
    }
}

/// Dashboard shortcut tile.
#[derive(Debug, Clone)]
pub struct ShortcutView {
    pub path: String,
    pub icon: &'static str,
    pub label: String,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub t: Translator,
    pub shell: ShellView,
    pub welcome: String,
    pub statistics: FigurePanel,
    pub balance: FigurePanel,
    pub shortcuts: Vec<ShortcutView>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// Dashboard page handler.
///
/// GET /dashboard
#[instrument(skip_all)]
pub async fn dashboard(
    page: AdminPage,
    State(state): State<AppState>,
) -> Result<DashboardTemplate, AppError> {
    let token = &page.admin.token;
    let (statistics, balance) = tokio::join!(
        state.hadawi().statistics(token),
        state.hadawi().balance(token)
    );

    let t = &page.t;
    let statistics = FigurePanel::load(t, "statistics", statistics)?;
    let balance = FigurePanel::load(t, "balance", balance)?;

    let name = page
        .admin
        .display_name()
        .unwrap_or_else(|| t.t("footer-generic-name"));
    let welcome = t.t_args("dashboard-welcome", &[("name", name.as_str())]);

    let shortcuts = SHORTCUTS
        .iter()
        .map(|resource| {
            let path = resource.list_path();
            ShortcutView {
                icon: icon_for(&path),
                label: t.t(&resource.title_key()),
                path,
            }
        })
        .collect();

    let shell = page.shell("/dashboard").await;
    Ok(DashboardTemplate {
        t: page.t,
        shell,
        welcome,
        statistics,
        balance,
        shortcuts,
    })
}
