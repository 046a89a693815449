use crate::domain::a001_product::ui::columns::asin_link;
use crate::shared::components::stat_card::change_style;
use crate::shared::data_table::{Align, CellValue, Column, DataRow, FilterKind};
use crate::shared::format::{format_currency, format_delta_pct, format_int};
use contracts::dashboards::d400_price_test_results::{AsinSales, MetricComparison};
use contracts::domain::a001_product::aggregate::marketplace_url;
use leptos::prelude::*;

impl DataRow for AsinSales {
    fn row_id(&self) -> String {
        self.asin.clone()
    }
}

fn comparison_cell(value: MetricComparison, format: fn(f64) -> String) -> AnyView {
    let (arrow, class) = change_style(value.delta_pct);
    view! {
        <div class="comparison-cell">
            <span class="comparison-cell__test">{format(value.test)}</span>
            <span class="comparison-cell__control">{format(value.control)}</span>
            <span class=class>{format!("{}{}", arrow, format_delta_pct(value.delta_pct))}</span>
        </div>
    }
    .into_any()
}

fn comparison_column(
    id: &'static str,
    header: &'static str,
    pick: fn(&AsinSales) -> MetricComparison,
    format: fn(f64) -> String,
) -> Column<AsinSales> {
    Column::new(id, header, move |row: &AsinSales| CellValue::from(pick(row).test))
        .filter(FilterKind::NumberRange)
        .align(Align::Right)
        .searchable(false)
        .render(move |row| comparison_cell(pick(row), format))
}

fn delta_column(
    id: &'static str,
    header: &'static str,
    pick: fn(&AsinSales) -> MetricComparison,
) -> Column<AsinSales> {
    Column::new(id, header, move |row: &AsinSales| CellValue::from(pick(row).delta_pct))
        .filter(FilterKind::NumberRange)
        .align(Align::Right)
        .searchable(false)
        .render(move |row| {
            let delta = pick(row).delta_pct;
            let (arrow, class) = change_style(delta);
            view! { <span class=class>{format!("{}{}", arrow, format_delta_pct(delta))}</span> }
                .into_any()
        })
}

/// Per-ASIN report: test value over control value with the change for each metric
pub fn asin_columns() -> Vec<Column<AsinSales>> {
    vec![
        Column::new("asin", "ASIN", |row: &AsinSales| CellValue::from(row.asin.as_str()))
            .filter(FilterKind::Text)
            .render(|row| asin_link(row.asin.clone(), marketplace_url(&row.asin))),
        Column::new("name", "Product", |row: &AsinSales| CellValue::from(row.name.as_str()))
            .filter(FilterKind::Text),
        comparison_column("units", "Units", |row| row.units, format_int),
        comparison_column("sales", "Sales", |row| row.sales, format_currency),
        delta_column("sales_delta", "Sales Δ", |row| row.sales),
        comparison_column("margin", "Margin", |row| row.margin, format_currency),
        delta_column("margin_delta", "Margin Δ", |row| row.margin),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::engine::compute_view;
    use crate::shared::data_table::{SortState, TableState};

    fn row(asin: &str, sales: (f64, f64)) -> AsinSales {
        AsinSales {
            asin: asin.to_string(),
            name: format!("Product {}", asin),
            units: MetricComparison::new(1.0, 1.0),
            sales: MetricComparison::new(sales.0, sales.1),
            margin: MetricComparison::default(),
        }
    }

    #[test]
    fn sorts_by_sales_change() {
        let rows = vec![row("B1", (110.0, 100.0)), row("B2", (90.0, 100.0)), row("B3", (150.0, 100.0))];
        let columns = asin_columns();
        let state = TableState::new(10, Some(SortState::descending("sales_delta")));
        let view = compute_view(&rows, &columns, &state);
        assert_eq!(view.rows, vec![2, 0, 1]);
    }

    #[test]
    fn search_matches_asin_and_name_only() {
        let rows = vec![row("B1", (110.0, 100.0)), row("B2", (90.0, 100.0))];
        let columns = asin_columns();
        let mut state = TableState::new(10, None);
        state.set_global_filter("b2");
        assert_eq!(compute_view(&rows, &columns, &state).rows, vec![1]);
        state.set_global_filter("110");
        assert!(compute_view(&rows, &columns, &state).rows.is_empty());
    }
}
