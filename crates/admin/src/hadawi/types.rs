//! Wire types for the Hadawi REST API.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use hadawi_core::{AdminRole, Email};

/// Bearer token issued by the Hadawi API at login.
///
/// Stored in the session; `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token.
    #[must_use]
    pub const fn new(raw: String) -> Self {
        Self(raw)
    }

    /// The raw token, for the `Authorization` header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Login request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Admin profile embedded in the login response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_email")]
    pub email: Option<Email>,
    #[serde(default)]
    pub role: Option<AdminRole>,
}

/// Login response body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: AccessToken,
    #[serde(default, alias = "user")]
    pub admin: AdminProfile,
    /// Token lifetime in seconds, when the API reports one.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl LoginResponse {
    /// Absolute expiry instant relative to `now`.
    #[must_use]
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.expires_in
            .filter(|secs| *secs > 0)
            .map(|secs| now + Duration::seconds(secs))
    }
}

/// Accept malformed emails from the API as absent rather than failing login.
fn lenient_email<'de, D>(deserializer: D) -> Result<Option<Email>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| Email::parse(&s).ok()))
}

/// An entity returned by the API, kept as an opaque JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// The record's identifier, whether the API sends it as a number or string.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Display text for a field; missing and null fields render as empty.
    #[must_use]
    pub fn display(&self, key: &str) -> String {
        self.0.get(key).map(display_value).unwrap_or_default()
    }

    /// All fields in API order, rendered for display.
    #[must_use]
    pub fn fields(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), display_value(value)))
            .collect()
    }
}

/// Render a JSON value for a table cell or detail row.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => ["name", "title", "name_en", "name_ar", "id"]
            .iter()
            .find_map(|key| map.get(*key).map(display_value))
            .unwrap_or_else(|| Value::Object(map.clone()).to_string()),
    }
}

/// Pagination metadata on list responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
}

/// List response: either a bare array or a `{data, meta}` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Paged {
        data: Vec<Record>,
        #[serde(default)]
        meta: Option<PageMeta>,
    },
    Bare(Vec<Record>),
}

/// Single-record response: either `{data: {...}}` or the bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordResponse {
    Wrapped { data: Record },
    Bare(Record),
}

impl From<RecordResponse> for Record {
    fn from(response: RecordResponse) -> Self {
        match response {
            RecordResponse::Wrapped { data } | RecordResponse::Bare(data) => data,
        }
    }
}

/// One page of records.
#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    pub records: Vec<Record>,
    pub page: u32,
    pub last_page: u32,
    pub total: Option<u64>,
}

impl RecordPage {
    pub(crate) fn from_response(response: ListResponse, requested_page: u32) -> Self {
        match response {
            ListResponse::Paged { data, meta } => {
                let meta = meta.unwrap_or_default();
                let page = meta.current_page.unwrap_or(requested_page).max(1);
                Self {
                    records: data,
                    page,
                    last_page: meta.last_page.unwrap_or(page).max(page),
                    total: meta.total,
                }
            }
            ListResponse::Bare(records) => Self {
                total: Some(records.len() as u64),
                records,
                page: 1,
                last_page: 1,
            },
        }
    }

    /// Whether another page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.last_page
    }
}

/// List request parameters.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
}

/// A named figure from a statistics or balance endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    pub key: String,
    pub value: String,
}

/// Flatten a statistics object into display figures.
///
/// Scalars become one figure each; nested objects are flattened one level
/// with `parent.child` keys. A `{data: {...}}` envelope is unwrapped first.
#[must_use]
pub fn figures_from(value: &Value) -> Vec<Figure> {
    let object = match value {
        Value::Object(map) => match map.get("data") {
            Some(Value::Object(inner)) => inner,
            _ => map,
        },
        _ => return Vec::new(),
    };

    let mut figures = Vec::new();
    for (key, value) in object {
        match value {
            Value::Object(nested) => {
                for (child, value) in nested {
                    if !value.is_object() && !value.is_array() {
                        figures.push(Figure {
                            key: format!("{key}.{child}"),
                            value: display_value(value),
                        });
                    }
                }
            }
            Value::Array(_) => {}
            scalar => figures.push(Figure {
                key: key.clone(),
                value: display_value(scalar),
            }),
        }
    }
    figures
}
