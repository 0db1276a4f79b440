//! Reusable view components shared by page templates.

pub mod data_table;

pub use data_table::{
    DataTableConfig, Pagination, TableColumn, TableRow, record_href, resource_table_config,
};
