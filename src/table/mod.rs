//! Row tables and multi-column filtering

pub mod display;
pub mod entities;
pub mod loader;

pub use display::{render_table, resolve_columns, rows_to_json};
pub use entities::{ColumnFilter, Row, RowFilter, filter_rows};
pub use loader::{TableError, load_rows, parse_rows};
