//! Analytics page.
//!
//! Shows every figure the statistics and balance endpoints return as plain
//! tables; the dashboard shows the same data as cards.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, routing::get};
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::i18n::Translator;
use crate::middleware::AdminPage;
use crate::navigation::ShellView;
use crate::state::AppState;

use super::dashboard::FigurePanel;

/// Analytics page template.
#[derive(Template, WebTemplate)]
#[template(path = "analytics.html")]
pub struct AnalyticsTemplate {
    pub t: Translator,
    pub shell: ShellView,
    pub statistics: FigurePanel,
    pub balance: FigurePanel,
}

/// Build the analytics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/analytics", get(analytics))
}

/// Analytics page handler.
///
/// GET /analytics
#[instrument(skip_all)]
async fn analytics(
    page: AdminPage,
    State(state): State<AppState>,
) -> Result<AnalyticsTemplate, AppError> {
    let token = &page.admin.token;
    let (statistics, balance) = tokio::join!(
        state.hadawi().statistics(token),
        state.hadawi().balance(token)
    );

    let statistics = FigurePanel::load(&page.t, "statistics", statistics)?;
    let balance = FigurePanel::load(&page.t, "balance", balance)?;

    let shell = page.shell("/analytics").await;
    Ok(AnalyticsTemplate {
        t: page.t,
        shell,
        statistics,
        balance,
    })
}
