//! Generic searchable, filterable, sortable, paged table with row selection.
//!
//! Pages describe their records with [`Column`]s and hand the rows in as a
//! signal; all state (search, filters, sort, page, selection) lives inside
//! the table. Selected records are reported through `on_selection_change`.

pub mod column;
pub mod engine;
pub mod filter;
pub mod filter_builder;
pub mod table;

pub use column::{Align, CellValue, Column, DataRow, FilterKind};
pub use engine::{PageSelection, SortDirection, SortState, TableState, TableView};
pub use filter::ColumnFilter;
pub use table::DataTable;
