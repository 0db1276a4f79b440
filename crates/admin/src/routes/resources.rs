//! Generic list, detail and form pages for every API resource.
//!
//! One handler family serves all resources; [`Resource`] decides the
//! columns, form fields and which mutations exist. A disallowed mutation is
//! a 404, the same as an unknown slug.
//!
//! Mutations follow post/redirect/get: success lands on the list with a
//! `?success=` flag. A validation failure re-renders the form with the
//! submitted values and the API's message.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use crate::components::{
    DataTableConfig, Pagination, TableRow, record_href, resource_table_config,
};
use crate::error::AppError;
use crate::filters;
use crate::hadawi::{HadawiError, ListQuery, Record, RecordPage};
use crate::i18n::Translator;
use crate::middleware::AdminPage;
use crate::models::{FieldKind, Resource};
use crate::navigation::ShellView;
use crate::state::AppState;

use super::{Alert, AlertParams};

// =============================================================================
// View Types
// =============================================================================

/// One label/value line on the detail page.
#[derive(Debug, Clone)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

/// One input on the create/edit form.
#[derive(Debug, Clone)]
pub struct FormFieldView {
    pub key: &'static str,
    pub label: String,
    pub input_type: &'static str,
    pub value: String,
    pub long_text: bool,
    pub flag: bool,
    pub checked: bool,
}

// =============================================================================
// Templates
// =============================================================================

/// Resource list page.
#[derive(Template, WebTemplate)]
#[template(path = "resources/index.html")]
pub struct ResourceIndexTemplate {
    pub t: Translator,
    pub shell: ShellView,
    pub title: String,
    pub base_path: String,
    pub table: DataTableConfig,
    pub rows: Vec<TableRow>,
    pub pagination: Pagination,
    pub search: String,
    pub alert: Option<Alert>,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// Resource detail page.
#[derive(Template, WebTemplate)]
#[template(path = "resources/show.html")]
pub struct ResourceShowTemplate {
    pub t: Translator,
    pub shell: ShellView,
    pub heading: String,
    pub base_path: String,
    pub record_path: String,
    pub rows: Vec<DetailRow>,
    pub alert: Option<Alert>,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// Resource create/edit form.
#[derive(Template, WebTemplate)]
#[template(path = "resources/form.html")]
pub struct ResourceFormTemplate {
    pub t: Translator,
    pub shell: ShellView,
    pub heading: String,
    pub action: String,
    pub cancel_href: String,
    pub fields: Vec<FormFieldView>,
    pub error: Option<String>,
}

/// Build the resource router.
///
/// Merge it after every static route; `/{slug}` matches any single segment.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(index).post(create))
        .route("/{slug}/new", get(new_form))
        .route("/{slug}/{id}", get(show).post(update))
        .route("/{slug}/{id}/edit", get(edit_form))
        .route("/{slug}/{id}/delete", post(destroy))
}

// =============================================================================
// Query Parameters
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Submitted form values by field key.
type FormValues = HashMap<String, String>;

// =============================================================================
// Helpers
// =============================================================================

fn resolve(slug: &str) -> Result<Resource, AppError> {
    Resource::from_slug(slug).ok_or_else(|| AppError::NotFound(format!("resource '{slug}'")))
}

fn require(allowed: bool, resource: Resource, action: &str) -> Result<(), AppError> {
    if allowed {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("{action} is not available for {resource}")))
    }
}

/// Let a rejected token end the request; log anything else for an inline alert.
fn surface(error: HadawiError, resource: Resource) -> Result<(), AppError> {
    if error.is_unauthorized() {
        return Err(error.into());
    }
    tracing::warn!(error = %error, resource = %resource, "Hadawi request failed");
    Ok(())
}

fn list_redirect(resource: Resource, query: &str) -> Response {
    Redirect::to(&format!("{}?{query}", resource.list_path())).into_response()
}

/// Build form inputs, reading each current value through `value_of`.
fn form_fields(
    t: &Translator,
    resource: Resource,
    value_of: impl Fn(&str) -> String,
) -> Vec<FormFieldView> {
    resource
        .form_fields()
        .map(|field| {
            let mut value = value_of(field.key);
            if field.kind == FieldKind::Date
                && let Some((date, _)) = value.split_once('T')
            {
                value = date.to_owned();
            }
            let flag = field.kind == FieldKind::Flag;
            FormFieldView {
                key: field.key,
                label: t.t(&field.label_key()),
                input_type: field.kind.input_type(),
                checked: flag && matches!(value.as_str(), "on" | "true" | "1"),
                long_text: field.kind == FieldKind::LongText,
                flag,
                value,
            }
        })
        .collect()
}

async fn form_page(
    page: AdminPage,
    resource: Resource,
    id: Option<&str>,
    fields: Vec<FormFieldView>,
    error: Option<String>,
) -> ResourceFormTemplate {
    let base_path = resource.list_path();
    let title = page.t.t(&resource.title_key());
    let (heading, action) = match id {
        Some(id) => (
            page.t.t_args(
                "form-edit-title",
                &[("resource", title.as_str()), ("id", id)],
            ),
            record_href(&base_path, id),
        ),
        None => (
            page.t
                .t_args("form-new-title", &[("resource", title.as_str())]),
            base_path.clone(),
        ),
    };
    let shell = page.shell(&base_path).await;

    ResourceFormTemplate {
        t: page.t,
        shell,
        heading,
        cancel_href: action.clone(),
        action,
        fields,
        error,
    }
}

/// Re-render a form the API refused, keeping what the admin typed.
async fn rejected_form(
    page: AdminPage,
    resource: Resource,
    id: Option<&str>,
    form: &FormValues,
    error: HadawiError,
) -> Result<Response, AppError> {
    let (status, message) = match error {
        HadawiError::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
        e if e.is_unauthorized() => return Err(e.into()),
        e => {
            tracing::warn!(error = %e, resource = %resource, "Failed to save record");
            (StatusCode::BAD_GATEWAY, page.t.t("alert-save-failed"))
        }
    };

    let fields = form_fields(&page.t, resource, |key| {
        form.get(key).cloned().unwrap_or_default()
    });
    let template = form_page(page, resource, id, fields, Some(message)).await;
    Ok((status, template).into_response())
}

// =============================================================================
// Handlers
// =============================================================================

/// Resource list with search and pagination.
///
/// GET /{slug}
#[instrument(skip(page, state, params))]
async fn index(
    page: AdminPage,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<ResourceIndexTemplate, AppError> {
    let resource = resolve(&slug)?;
    let search = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_owned);
    let query = ListQuery {
        page: params.page.unwrap_or(1).max(1),
        per_page: state.config().page_size,
        search: search.clone(),
    };

    let mut alert = Alert::from_params(
        &page.t,
        &AlertParams {
            success: params.success,
            error: params.error,
        },
    );
    let records = match state
        .hadawi()
        .list(&page.admin.token, resource.api_path(), &query)
        .await
    {
        Ok(records) => records,
        Err(e) => {
            surface(e, resource)?;
            alert = Some(Alert::error(page.t.t("alert-load-failed")));
            RecordPage {
                page: query.page,
                last_page: query.page,
                ..RecordPage::default()
            }
        }
    };

    let base_path = resource.list_path();
    let table = resource_table_config(resource, &page.t);
    let rows = table.rows(&base_path, &records.records);
    let pagination = Pagination::new(&page.t, &base_path, search.as_deref(), &records);
    let capabilities = resource.capabilities();
    let title = page.t.t(&resource.title_key());
    let shell = page.shell(&base_path).await;

    Ok(ResourceIndexTemplate {
        t: page.t,
        shell,
        title,
        base_path,
        table,
        rows,
        pagination,
        search: search.unwrap_or_default(),
        alert,
        can_create: capabilities.create,
        can_edit: capabilities.edit,
        can_delete: capabilities.delete,
    })
}

/// Record detail page.
///
/// GET /{slug}/{id}
#[instrument(skip(page, state, params))]
async fn show(
    page: AdminPage,
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
    Query(params): Query<AlertParams>,
) -> Result<ResourceShowTemplate, AppError> {
    let resource = resolve(&slug)?;
    let mut alert = Alert::from_params(&page.t, &params);

    let record = match state
        .hadawi()
        .get(&page.admin.token, resource.api_path(), &id)
        .await
    {
        Ok(record) => record,
        Err(HadawiError::NotFound(_)) => {
            return Err(AppError::NotFound(format!("{resource} {id}")));
        }
        Err(e) => {
            surface(e, resource)?;
            alert = Some(Alert::error(page.t.t("alert-load-failed")));
            Record::default()
        }
    };

    let rows = record
        .fields()
        .into_iter()
        .map(|(key, value)| DetailRow {
            label: page.t.label("field", &key),
            value,
        })
        .collect();

    let base_path = resource.list_path();
    let title = page.t.t(&resource.title_key());
    let heading = page
        .t
        .t_args("detail-title", &[("resource", title.as_str()), ("id", id.as_str())]);
    let capabilities = resource.capabilities();
    let shell = page.shell(&base_path).await;

    Ok(ResourceShowTemplate {
        t: page.t,
        shell,
        heading,
        record_path: record_href(&base_path, &id),
        base_path,
        rows,
        alert,
        can_edit: capabilities.edit,
        can_delete: capabilities.delete,
    })
}

/// Empty create form.
///
/// GET /{slug}/new
#[instrument(skip(page))]
async fn new_form(page: AdminPage, Path(slug): Path<String>) -> Result<ResourceFormTemplate, AppError> {
    let resource = resolve(&slug)?;
    require(resource.capabilities().create, resource, "create")?;

    let fields = form_fields(&page.t, resource, |_| String::new());
    Ok(form_page(page, resource, None, fields, None).await)
}

/// Create a record.
///
/// POST /{slug}
#[instrument(skip(page, state, form))]
async fn create(
    page: AdminPage,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<FormValues>,
) -> Result<Response, AppError> {
    let resource = resolve(&slug)?;
    require(resource.capabilities().create, resource, "create")?;

    let payload = resource.payload(&form);
    match state
        .hadawi()
        .create(&page.admin.token, resource.api_path(), &payload)
        .await
    {
        Ok(()) => {
            tracing::info!(resource = %resource, "Record created");
            Ok(list_redirect(resource, "success=created"))
        }
        Err(e) => rejected_form(page, resource, None, &form, e).await,
    }
}

/// Edit form prefilled from the API.
///
/// GET /{slug}/{id}/edit
#[instrument(skip(page, state))]
async fn edit_form(
    page: AdminPage,
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let resource = resolve(&slug)?;
    require(resource.capabilities().edit, resource, "edit")?;

    let record = match state
        .hadawi()
        .get(&page.admin.token, resource.api_path(), &id)
        .await
    {
        Ok(record) => record,
        Err(HadawiError::NotFound(_)) => {
            return Err(AppError::NotFound(format!("{resource} {id}")));
        }
        Err(e) => {
            surface(e, resource)?;
            return Ok(list_redirect(resource, "error=load"));
        }
    };

    let fields = form_fields(&page.t, resource, |key| record.display(key));
    Ok(form_page(page, resource, Some(&id), fields, None)
        .await
        .into_response())
}

/// Update a record.
///
/// POST /{slug}/{id}
#[instrument(skip(page, state, form))]
async fn update(
    page: AdminPage,
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
    Form(form): Form<FormValues>,
) -> Result<Response, AppError> {
    let resource = resolve(&slug)?;
    require(resource.capabilities().edit, resource, "edit")?;

    let payload = resource.payload(&form);
    match state
        .hadawi()
        .update(&page.admin.token, resource.api_path(), &id, &payload)
        .await
    {
        Ok(()) => {
            tracing::info!(resource = %resource, id = %id, "Record updated");
            Ok(list_redirect(resource, "success=updated"))
        }
        Err(e) => rejected_form(page, resource, Some(&id), &form, e).await,
    }
}

/// Delete a record.
///
/// POST /{slug}/{id}/delete
#[instrument(skip(page, state))]
async fn destroy(
    page: AdminPage,
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let resource = resolve(&slug)?;
    require(resource.capabilities().delete, resource, "delete")?;

    match state
        .hadawi()
        .delete(&page.admin.token, resource.api_path(), &id)
        .await
    {
        Ok(()) => {
            tracing::info!(resource = %resource, id = %id, "Record deleted");
            Ok(list_redirect(resource, "success=deleted"))
        }
        Err(e) => {
            surface(e, resource)?;
            Ok(list_redirect(resource, "error=delete"))
        }
    }
}
