//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Longest value shown in a table cell before it is cut with an ellipsis.
const MAX_CELL_CHARS: usize = 60;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Shorten long values for table cells; the detail page shows them in full.
///
/// Usage in templates: `{{ value|cell }}`
#[askama::filter_fn]
pub fn cell(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(truncate_chars(&value.to_string(), MAX_CELL_CHARS))
}

fn truncate_chars(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_owned();
    }
    let mut cut: String = value.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
