use leptos::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Record type that can be shown in a [`DataTable`](super::DataTable).
///
/// The id must be stable across reloads; selection is keyed by it.
pub trait DataRow: Clone + Send + Sync + 'static {
    fn row_id(&self) -> String;
}

/// Value a column extracts from a row for searching, filtering and sorting
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Text used by the global search and text filters
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::Empty => String::new(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Case-insensitive substring test; `needle` must already be lowercase
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.display().to_lowercase().contains(needle)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Number(value as f64)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// Kind of per-column filter a column offers
#[derive(Clone, Debug, PartialEq)]
pub enum FilterKind {
    /// Case-insensitive substring
    Text,
    /// Inclusive numeric range, either bound optional
    NumberRange,
    /// Set membership; empty `options` means "distinct values of the column"
    MultiSelect { options: Vec<String> },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

impl Align {
    pub fn class(&self) -> &'static str {
        match self {
            Align::Left => "data-table__cell",
            Align::Right => "data-table__cell data-table__cell--right",
            Align::Center => "data-table__cell data-table__cell--center",
        }
    }
}

pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;
pub type CellRenderer<T> = Arc<dyn Fn(&T) -> AnyView + Send + Sync>;

/// Column descriptor: accessor, header and optional renderer / filter metadata
pub struct Column<T> {
    pub id: &'static str,
    pub header: &'static str,
    accessor: Accessor<T>,
    renderer: Option<CellRenderer<T>>,
    pub filter: Option<FilterKind>,
    pub searchable: bool,
    pub sortable: bool,
    pub align: Align,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            header: self.header,
            accessor: self.accessor.clone(),
            renderer: self.renderer.clone(),
            filter: self.filter.clone(),
            searchable: self.searchable,
            sortable: self.sortable,
            align: self.align,
        }
    }
}

impl<T> Column<T> {
    pub fn new(
        id: &'static str,
        header: &'static str,
        accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            header,
            accessor: Arc::new(accessor),
            renderer: None,
            filter: None,
            searchable: true,
            sortable: true,
            align: Align::Left,
        }
    }

    pub fn render(mut self, renderer: impl Fn(&T) -> AnyView + Send + Sync + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn filter(mut self, kind: FilterKind) -> Self {
        self.filter = Some(kind);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    pub fn render_cell(&self, row: &T) -> AnyView {
        match &self.renderer {
            Some(renderer) => renderer(row),
            None => {
                let text = self.value(row).display();
                view! { <span>{text}</span> }.into_any()
            }
        }
    }

    /// Options offered by a multi-select filter
    pub fn filter_options(&self, rows: &[T]) -> Vec<String> {
        match &self.filter {
            Some(FilterKind::MultiSelect { options }) if !options.is_empty() => options.clone(),
            Some(FilterKind::MultiSelect { .. }) => rows
                .iter()
                .map(|row| self.value(row))
                .filter(|value| !value.is_empty())
                .map(|value| value.display())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Item {
        status: &'static str,
    }

    #[test]
    fn display_and_number_conversion() {
        assert_eq!(CellValue::Number(12.0).display(), "12");
        assert_eq!(CellValue::Number(12.5).display(), "12.5");
        assert_eq!(CellValue::Text(" 7.5 ".into()).as_number(), Some(7.5));
        assert_eq!(CellValue::Text("n/a".into()).as_number(), None);
        assert!(CellValue::from(None::<String>).is_empty());
    }

    #[test]
    fn contains_is_case_insensitive() {
        assert!(CellValue::from("Blue Mug").contains_lowercase("mug"));
        assert!(!CellValue::Empty.contains_lowercase("mug"));
    }

    #[test]
    fn multi_select_options_default_to_distinct_values() {
        let column = Column::new("status", "Status", |i: &Item| CellValue::from(i.status))
            .filter(FilterKind::MultiSelect { options: vec![] });
        let rows = vec![
            Item { status: "inactive" },
            Item { status: "active" },
            Item { status: "inactive" },
            Item { status: "" },
        ];
        assert_eq!(column.filter_options(&rows), vec!["active", "inactive"]);

        let fixed = column.clone().filter(FilterKind::MultiSelect {
            options: vec!["paused".into()],
        });
        assert_eq!(fixed.filter_options(&rows), vec!["paused"]);
    }
}
