//! Data table component types.
//!
//! These types define the configuration and rendered rows of the list table
//! every resource page shares.

use crate::hadawi::{Record, RecordPage};
use crate::i18n::Translator;
use crate::models::Resource;

/// Column definition for a data table.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Record key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
}

impl TableColumn {
    /// Create a new column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Icon for empty state.
    pub empty_icon: String,
    /// Title for empty state.
    pub empty_title: String,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            search_placeholder: "Search...".to_string(),
            empty_icon: "inbox".to_string(),
            empty_title: "No items found".to_string(),
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, icon: &str, title: &str) -> Self {
        self.empty_icon = icon.to_string();
        self.empty_title = title.to_string();
        self
    }

    /// Render records as rows in column order.
    #[must_use]
    pub fn rows(&self, base_path: &str, records: &[Record]) -> Vec<TableRow> {
        records
            .iter()
            .map(|record| {
                let id = record.id();
                TableRow {
                    href: id.as_deref().map(|id| record_href(base_path, id)),
                    id,
                    cells: self
                        .columns
                        .iter()
                        .map(|column| record.display(&column.key))
                        .collect(),
                }
            })
            .collect()
    }
}

/// Link to one record: `id` is encoded as a single path segment.
#[must_use]
pub fn record_href(base_path: &str, id: &str) -> String {
    let segment: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("{base_path}/{}", segment.replace('+', "%20"))
}

/// A rendered table row.
#[derive(Debug, Clone)]
pub struct TableRow {
    /// Record id; rows without one get no actions.
    pub id: Option<String>,
    /// Detail page link.
    pub href: Option<String>,
    pub cells: Vec<String>,
}

/// Pager under the table.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub label: String,
    pub total: Option<String>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl Pagination {
    /// Build the pager for `page`, keeping the search term in the links.
    #[must_use]
    pub fn new(t: &Translator, base_path: &str, search: Option<&str>, page: &RecordPage) -> Self {
        let href = |number: u32| {
            let mut query = url::form_urlencoded::Serializer::new(String::new());
            if let Some(q) = search.filter(|q| !q.is_empty()) {
                query.append_pair("q", q);
            }
            query.append_pair("page", &number.to_string());
            format!("{base_path}?{}", query.finish())
        };

        let current = page.page.to_string();
        let last = page.last_page.to_string();
        Self {
            label: t.t_args("table-page", &[("page", current.as_str()), ("last", last.as_str())]),
            total: page.total.map(|total| {
                let total = total.to_string();
                t.t_args("table-total", &[("total", total.as_str())])
            }),
            prev_href: (page.page > 1).then(|| href(page.page - 1)),
            next_href: page.has_next().then(|| href(page.page + 1)),
        }
    }
}

/// Build the list table configuration for a resource.
#[must_use]
pub fn resource_table_config(resource: Resource, t: &Translator) -> DataTableConfig {
    resource
        .columns()
        .fold(DataTableConfig::new(resource.slug()), |config, field| {
            config.column(TableColumn::new(field.key, &t.t(&field.label_key())))
        })
        .search_placeholder(&t.t("table-search-placeholder"))
        .empty_state("inbox", &t.t("table-empty"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::i18n::Catalog;
    use hadawi_core::Language;

    fn translator() -> Translator {
        Translator::new(Arc::new(Catalog::load().unwrap()), Language::En)
    }

    #[test]
    fn test_resource_table_uses_listed_columns() {
        let config = resource_table_config(Resource::Taxes, &translator());
        let keys: Vec<&str> = config.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "rate", "active"]);
        assert_eq!(config.columns[1].label, "Rate (%)");
        assert_eq!(config.empty_title, "No records found.");
    }

    #[test]
    fn test_rows_link_to_detail() {
        let config = resource_table_config(Resource::Taxes, &translator());
        let records: Vec<Record> = vec![
            serde_json::from_value(json!({ "id": 3, "name": "VAT", "rate": 15, "active": true }))
                .unwrap(),
            serde_json::from_value(json!({ "name": "orphan" })).unwrap(),
        ];
        let rows = config.rows("/taxes", &records);
        assert_eq!(rows[0].href.as_deref(), Some("/taxes/3"));
        assert_eq!(rows[0].cells, vec!["VAT", "15", "true"]);
        assert!(rows[1].href.is_none());
    }

    #[test]
    fn test_row_links_encode_ids() {
        let config = resource_table_config(Resource::Taxes, &translator());
        let records: Vec<Record> = vec![
            serde_json::from_value(json!({ "id": "gift/box?x=1#top" })).unwrap(),
            serde_json::from_value(json!({ "id": "eid sale+1" })).unwrap(),
        ];
        let rows = config.rows("/taxes", &records);
        assert_eq!(
            rows[0].href.as_deref(),
            Some("/taxes/gift%2Fbox%3Fx%3D1%23top")
        );
        assert_eq!(rows[0].id.as_deref(), Some("gift/box?x=1#top"));
        assert_eq!(rows[1].href.as_deref(), Some("/taxes/eid%20sale%2B1"));
        assert_eq!(record_href("/occasions", "42"), "/occasions/42");
    }

    #[test]
    fn test_pagination_links_keep_search() {
        let page = RecordPage {
            records: vec![],
            page: 2,
            last_page: 3,
            total: Some(45),
        };
        let pager = Pagination::new(&translator(), "/users", Some("sara a"), &page);
        assert_eq!(pager.label, "Page 2 of 3");
        assert_eq!(pager.total.as_deref(), Some("45 records"));
        assert_eq!(pager.prev_href.as_deref(), Some("/users?q=sara+a&page=1"));
        assert_eq!(pager.next_href.as_deref(), Some("/users?q=sara+a&page=3"));

        let last = RecordPage { page: 3, ..page };
        let pager = Pagination::new(&translator(), "/users", None, &last);
        assert!(pager.next_href.is_none());
        assert_eq!(pager.prev_href.as_deref(), Some("/users?page=2"));
    }
}
