//! State and row pipeline of the data table: global search, column filters,
//! sorting, pagination and selection. Pure functions over `TableState`; the
//! component only wires them to signals.

use super::column::{CellValue, Column, DataRow};
use super::filter::ColumnFilter;
use std::cmp::Ordering;
use std::collections::HashSet;

pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(column_id: &str) -> Self {
        Self {
            column_id: column_id.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column_id: &str) -> Self {
        Self {
            column_id: column_id.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

/// Selection state of the rows on the visible page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSelection {
    None,
    Some,
    All,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableState {
    pub global_filter: String,
    pub filters: Vec<ColumnFilter>,
    pub sorting: Option<SortState>,
    pub page_index: usize,
    pub page_size: usize,
    /// Ids of selected rows; survives filtering, sorting and paging
    pub selection: HashSet<String>,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, None)
    }
}

impl TableState {
    pub fn new(page_size: usize, sorting: Option<SortState>) -> Self {
        Self {
            global_filter: String::new(),
            filters: Vec::new(),
            sorting,
            page_index: 0,
            page_size: page_size.max(1),
            selection: HashSet::new(),
        }
    }

    pub fn set_global_filter(&mut self, query: impl Into<String>) {
        self.global_filter = query.into();
        self.page_index = 0;
    }

    /// Adds a filter, replacing the one already set on the same column
    pub fn upsert_filter(&mut self, filter: ColumnFilter) {
        self.filters.retain(|f| f.column_id != filter.column_id);
        self.filters.push(filter);
        self.page_index = 0;
    }

    pub fn remove_filter(&mut self, column_id: &str) {
        self.filters.retain(|f| f.column_id != column_id);
        self.page_index = 0;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page_index = 0;
    }

    pub fn filter_for(&self, column_id: &str) -> Option<&ColumnFilter> {
        self.filters.iter().find(|f| f.column_id == column_id)
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Cycles ascending → descending → unsorted for one column
    pub fn toggle_sort(&mut self, column_id: &str) {
        self.sorting = match self.sorting.take() {
            Some(current) if current.column_id == column_id => match current.direction {
                SortDirection::Ascending => Some(SortState::descending(column_id)),
                SortDirection::Descending => None,
            },
            _ => Some(SortState::ascending(column_id)),
        };
    }

    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sorting
            .as_ref()
            .filter(|s| s.column_id == column_id)
            .map(|s| s.direction)
    }

    /// Changes the page size and moves to the page holding the first row of
    /// the previous view
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        let first_row = self.page_index * self.page_size;
        self.page_size = page_size;
        self.page_index = first_row / page_size;
    }

    pub fn go_to_page(&mut self, page_index: usize, page_count: usize) {
        self.page_index = page_index.min(page_count.saturating_sub(1));
    }

    pub fn set_row_selected(&mut self, id: &str, selected: bool) {
        if selected {
            self.selection.insert(id.to_string());
        } else {
            self.selection.remove(id);
        }
    }

    /// Selects or deselects exactly the given rows (the visible page)
    pub fn set_page_selected<'a>(&mut self, ids: impl IntoIterator<Item = &'a String>, selected: bool) {
        for id in ids {
            self.set_row_selected(id, selected);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Selected records in their original order, regardless of filters
    pub fn selected_rows<T: DataRow>(&self, rows: &[T]) -> Vec<T> {
        rows.iter()
            .filter(|row| self.selection.contains(&row.row_id()))
            .cloned()
            .collect()
    }

    pub fn page_selection(&self, page_ids: &[String]) -> PageSelection {
        let selected = page_ids.iter().filter(|id| self.is_selected(id)).count();
        if selected == 0 {
            PageSelection::None
        } else if selected == page_ids.len() {
            PageSelection::All
        } else {
            PageSelection::Some
        }
    }
}

/// Result of running the pipeline over the current rows
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableView {
    /// Indices into the source rows after filtering and sorting
    pub rows: Vec<usize>,
    /// Indices shown on the current page
    pub page_rows: Vec<usize>,
    /// Effective page index, clamped to the available pages
    pub page_index: usize,
    pub page_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

impl TableView {
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }
}

pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

/// Global search over the searchable columns of one row.
/// `query` must already be lowercase; an empty query matches.
pub fn matches_global<T>(row: &T, columns: &[Column<T>], query: &str) -> bool {
    query.is_empty()
        || columns
            .iter()
            .filter(|c| c.searchable)
            .any(|c| c.value(row).contains_lowercase(query))
}

/// Indices of rows passing the global search and every column filter
pub fn filter_rows<T>(rows: &[T], columns: &[Column<T>], state: &TableState) -> Vec<usize> {
    let query = state.global_filter.trim().to_lowercase();
    let active: Vec<(&ColumnFilter, &Column<T>)> = state
        .filters
        .iter()
        .filter_map(|f| columns.iter().find(|c| c.id == f.column_id).map(|c| (f, c)))
        .collect();

    rows.iter()
        .enumerate()
        .filter(|(_, row)| matches_global(*row, columns, &query))
        .filter(|(_, row)| active.iter().all(|(f, c)| f.matches(&c.value(row))))
        .map(|(i, _)| i)
        .collect()
}

/// Default ordering: numbers numerically, everything else as
/// case-insensitive text
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => a.display().to_lowercase().cmp(&b.display().to_lowercase()),
    }
}

/// Stable sort of `indices`; empty cells always go last
pub fn sort_rows<T>(rows: &[T], columns: &[Column<T>], indices: &mut [usize], sorting: Option<&SortState>) {
    let Some(sorting) = sorting else { return };
    let Some(column) = columns.iter().find(|c| c.id == sorting.column_id) else {
        return;
    };
    let mut keyed: Vec<(usize, CellValue)> = indices
        .iter()
        .map(|&i| (i, column.value(&rows[i])))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = compare_cells(a, b);
            match sorting.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    });
    for (slot, (i, _)) in indices.iter_mut().zip(keyed) {
        *slot = i;
    }
}

pub fn compute_view<T>(rows: &[T], columns: &[Column<T>], state: &TableState) -> TableView {
    let mut filtered = filter_rows(rows, columns, state);
    sort_rows(rows, columns, &mut filtered, state.sorting.as_ref());

    let page_count = page_count(filtered.len(), state.page_size);
    let page_index = state.page_index.min(page_count - 1);
    let start = page_index * state.page_size;
    let page_rows = filtered
        .iter()
        .skip(start)
        .take(state.page_size)
        .copied()
        .collect();

    TableView {
        rows: filtered,
        page_rows,
        page_index,
        page_count,
        can_previous: page_index > 0,
        can_next: page_index + 1 < page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::column::FilterKind;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: u32,
        name: String,
        price: Option<f64>,
        status: &'static str,
    }

    impl DataRow for Item {
        fn row_id(&self) -> String {
            self.id.to_string()
        }
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("name", "Name", |i: &Item| CellValue::from(i.name.clone()))
                .filter(FilterKind::Text),
            Column::new("price", "Price", |i: &Item| CellValue::from(i.price))
                .filter(FilterKind::NumberRange),
            Column::new("status", "Status", |i: &Item| CellValue::from(i.status))
                .filter(FilterKind::MultiSelect { options: vec![] }),
        ]
    }

    fn items(n: u32) -> Vec<Item> {
        (1..=n)
            .map(|id| Item {
                id,
                name: format!("Item {id:02}"),
                price: Some(id as f64 * 10.0),
                status: if id % 2 == 0 { "active" } else { "inactive" },
            })
            .collect()
    }

    fn names(rows: &[Item], view: &[usize]) -> Vec<String> {
        view.iter().map(|&i| rows[i].name.clone()).collect()
    }

    #[test]
    fn global_search_is_case_insensitive_substring_and_idempotent() {
        let mut rows = items(3);
        rows[1].name = "Blue MUG".into();
        let cols = columns();
        let mut state = TableState::default();
        state.set_global_filter("mug");

        let first = compute_view(&rows, &cols, &state);
        assert_eq!(names(&rows, &first.rows), vec!["Blue MUG"]);
        let second = compute_view(&rows, &cols, &state);
        assert_eq!(first, second);
    }

    #[test]
    fn global_search_covers_numbers_and_skips_unsearchable_columns() {
        let rows = items(3);
        let mut cols = columns();
        let mut state = TableState::default();
        state.set_global_filter("30");
        assert_eq!(compute_view(&rows, &cols, &state).rows, vec![2]);

        cols[1] = cols[1].clone().searchable(false);
        assert!(compute_view(&rows, &cols, &state).rows.is_empty());
    }

    #[test]
    fn numeric_filter_keeps_rows_inside_inclusive_range() {
        let rows = items(10);
        let cols = columns();
        let mut state = TableState::new(50, None);
        state.upsert_filter(ColumnFilter::range("price", "Price", "30", "60").unwrap());
        let view = compute_view(&rows, &cols, &state);
        assert_eq!(view.total_rows(), 4);
        for &i in &view.rows {
            let price = rows[i].price.unwrap();
            assert!((30.0..=60.0).contains(&price));
        }
    }

    #[test]
    fn second_filter_on_same_column_replaces_first() {
        let mut state = TableState::default();
        state.upsert_filter(ColumnFilter::range("price", "Price", "10", "").unwrap());
        state.upsert_filter(ColumnFilter::range("price", "Price", "", "20").unwrap());
        assert_eq!(state.active_filter_count(), 1);
        assert_eq!(state.filter_for("price").unwrap().label, "Price ≤ 20");
    }

    #[test]
    fn filters_combine_with_and_values_with_or() {
        let rows = items(10);
        let cols = columns();
        let mut state = TableState::new(50, None);
        state.upsert_filter(
            ColumnFilter::one_of("status", "Status", vec!["active".into(), "inactive".into()])
                .unwrap(),
        );
        assert_eq!(compute_view(&rows, &cols, &state).total_rows(), 10);

        state.upsert_filter(ColumnFilter::one_of("status", "Status", vec!["active".into()]).unwrap());
        state.upsert_filter(ColumnFilter::range("price", "Price", "50", "").unwrap());
        let view = compute_view(&rows, &cols, &state);
        assert_eq!(names(&rows, &view.rows), vec!["Item 06", "Item 08", "Item 10"]);
    }

    #[test]
    fn clearing_filters_restores_row_count() {
        let rows = items(25);
        let cols = columns();
        let mut state = TableState::default();
        state.upsert_filter(ColumnFilter::text("name", "Name", "item 1").unwrap());
        state.upsert_filter(ColumnFilter::range("price", "Price", "", "120").unwrap());
        assert!(compute_view(&rows, &cols, &state).total_rows() < 25);
        state.clear_filters();
        assert_eq!(compute_view(&rows, &cols, &state).total_rows(), 25);
    }

    #[test]
    fn select_all_only_touches_visible_page() {
        let rows = items(25);
        let cols = columns();
        let mut state = TableState::new(10, None);
        state.go_to_page(2, 3);
        let view = compute_view(&rows, &cols, &state);
        let page_ids: Vec<String> = view.page_rows.iter().map(|&i| rows[i].row_id()).collect();
        assert_eq!(page_ids.len(), 5);

        state.set_page_selected(&page_ids, true);
        assert_eq!(state.selection.len(), 5);
        assert_eq!(state.page_selection(&page_ids), PageSelection::All);
        assert_eq!(
            state.selected_rows(&rows).iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![21, 22, 23, 24, 25]
        );

        state.set_row_selected("21", false);
        assert_eq!(state.page_selection(&page_ids), PageSelection::Some);
        state.clear_selection();
        assert_eq!(state.page_selection(&page_ids), PageSelection::None);
        assert!(state.selected_rows(&rows).is_empty());
    }

    #[test]
    fn selection_survives_filtering() {
        let rows = items(5);
        let cols = columns();
        let mut state = TableState::default();
        state.set_row_selected("1", true);
        state.set_global_filter("item 05");
        assert_eq!(compute_view(&rows, &cols, &state).total_rows(), 1);
        assert_eq!(state.selected_rows(&rows)[0].id, 1);
    }

    #[test]
    fn empty_result_has_one_page_and_no_navigation() {
        let rows: Vec<Item> = Vec::new();
        let view = compute_view(&rows, &columns(), &TableState::default());
        assert!(view.page_rows.is_empty());
        assert_eq!(view.page_count, 1);
        assert!(!view.can_previous);
        assert!(!view.can_next);
    }

    #[test]
    fn page_size_change_keeps_first_visible_row() {
        let rows = items(45);
        let cols = columns();
        let mut state = TableState::new(10, None);
        state.go_to_page(3, 5);
        let before = compute_view(&rows, &cols, &state);
        let first_row = before.page_rows[0];

        state.set_page_size(20);
        let after = compute_view(&rows, &cols, &state);
        assert_eq!(after.page_index, 1);
        assert!(after.page_rows.contains(&first_row));
        assert!(after.can_previous);
        assert!(after.can_next);
    }

    #[test]
    fn filter_change_resets_page_and_index_is_clamped() {
        let rows = items(30);
        let cols = columns();
        let mut state = TableState::new(10, None);
        state.go_to_page(2, 3);
        state.set_global_filter("item");
        assert_eq!(state.page_index, 0);

        state.page_index = 7;
        let view = compute_view(&rows, &cols, &state);
        assert_eq!(view.page_index, 2);
        assert!(!view.can_next);
        state.go_to_page(99, view.page_count);
        assert_eq!(state.page_index, 2);
    }

    #[test]
    fn sorting_cycles_and_puts_empty_values_last() {
        let mut rows = items(4);
        rows[2].price = None;
        let cols = columns();
        let mut state = TableState::new(10, Some(SortState::ascending("price")));
        let view = compute_view(&rows, &cols, &state);
        assert_eq!(view.rows, vec![0, 1, 3, 2]);

        state.toggle_sort("price");
        assert_eq!(state.sort_direction("price"), Some(SortDirection::Descending));
        assert_eq!(compute_view(&rows, &cols, &state).rows, vec![3, 1, 0, 2]);

        state.toggle_sort("price");
        assert_eq!(state.sorting, None);
        assert_eq!(compute_view(&rows, &cols, &state).rows, vec![0, 1, 2, 3]);

        state.toggle_sort("name");
        assert_eq!(state.sort_direction("name"), Some(SortDirection::Ascending));
        assert_eq!(state.sort_direction("price"), None);
    }

    #[test]
    fn text_sort_ignores_case_and_is_stable() {
        let mut rows = items(3);
        rows[0].name = "banana".into();
        rows[1].name = "Apple".into();
        rows[2].name = "apple".into();
        let state = TableState::new(10, Some(SortState::ascending("name")));
        let view = compute_view(&rows, &columns(), &state);
        assert_eq!(view.rows, vec![1, 2, 0]);
    }
}
