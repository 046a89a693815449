use crate::domain::a003_price_test::api::{create_price_test, fetch_price_tests};
use crate::domain::a003_price_test::ui::create_dialog::CreateTestDialog;
use crate::shared::components::warning_box::WarningBox;
use crate::shared::data_table::{Align, CellValue, Column, DataRow, DataTable, FilterKind, SortState};
use crate::shared::date_utils::{format_date, to_input_value};
use crate::shared::icons::icon;
use crate::shared::request_guard::RequestGuard;
use contracts::domain::a003_price_test::aggregate::{NewPriceTest, PriceTest, PriceTestStatus};
use leptos::prelude::*;
use thaw::{Badge, BadgeAppearance, BadgeColor};

impl DataRow for PriceTest {
    fn row_id(&self) -> String {
        self.id.to_string()
    }
}

fn status_color(status: PriceTestStatus) -> BadgeColor {
    match status {
        PriceTestStatus::Planned => BadgeColor::Informative,
        PriceTestStatus::Running => BadgeColor::Success,
        PriceTestStatus::Paused => BadgeColor::Warning,
        PriceTestStatus::Completed => BadgeColor::Subtle,
    }
}

fn price_test_columns() -> Vec<Column<PriceTest>> {
    vec![
        Column::new("name", "Name", |t: &PriceTest| CellValue::from(t.name.as_str()))
            .filter(FilterKind::Text),
        Column::new("group", "Group", |t: &PriceTest| CellValue::from(t.group_name.clone()))
            .filter(FilterKind::MultiSelect { options: vec![] }),
        // ISO dates sort chronologically as text
        Column::new("start_date", "Start", |t: &PriceTest| {
            CellValue::from(to_input_value(Some(t.start_date)))
        })
        .searchable(false)
        .render(|t| {
            let text = format_date(&t.start_date);
            view! { <span>{text}</span> }.into_any()
        }),
        Column::new("end_date", "End", |t: &PriceTest| {
            CellValue::from(to_input_value(Some(t.end_date)))
        })
        .searchable(false)
        .render(|t| {
            let text = format_date(&t.end_date);
            view! { <span>{text}</span> }.into_any()
        }),
        Column::new("duration", "Days", |t: &PriceTest| {
            CellValue::from(t.duration_days() as f64)
        })
        .filter(FilterKind::NumberRange)
        .align(Align::Right)
        .searchable(false),
        Column::new("items", "Products", |t: &PriceTest| CellValue::from(t.items.len()))
            .align(Align::Right)
            .searchable(false),
        Column::new("status", "Status", |t: &PriceTest| CellValue::from(t.status.label()))
            .filter(FilterKind::MultiSelect {
                options: PriceTestStatus::all()
                    .iter()
                    .map(|s| s.label().to_string())
                    .collect(),
            })
            .render(|t| {
                let status = t.status;
                view! {
                    <Badge appearance=BadgeAppearance::Tint color=status_color(status)>
                        {status.label()}
                    </Badge>
                }
                .into_any()
            }),
        Column::new("controlled", "Type", |t: &PriceTest| {
            CellValue::from(if t.is_controlled_test { "Controlled" } else { "Standard" })
        })
        .filter(FilterKind::MultiSelect { options: vec![] }),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn PriceTestList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<PriceTest>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (show_dialog, set_show_dialog) = signal(false);
    let guard = StoredValue::new(RequestGuard::for_component());

    let fetch = move || {
        let ticket = guard.with_value(|g| g.begin());
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_price_tests().await;
            ticket.apply("price tests", || {
                match result {
                    Ok(tests) => {
                        set_items.set(tests);
                        set_error.set(None);
                    }
                    Err(e) => {
                        log::error!("failed to load price tests: {}", e);
                        set_error.set(Some(e.to_string()));
                    }
                }
                set_loading.set(false);
            });
        });
    };

    let on_submit = Callback::new(move |dto: NewPriceTest| {
        let page = guard.with_value(|g| g.clone());
        wasm_bindgen_futures::spawn_local(async move {
            let result = create_price_test(&dto).await;
            if page.is_closed() {
                return;
            }
            match result {
                Ok(_) => {
                    log::info!("created price test {:?}", dto.name);
                    fetch();
                }
                Err(e) => {
                    log::error!("failed to create price test: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    });

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Price Tests"</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| set_show_dialog.set(true)>
                        {icon("plus")}
                        "Create Test"
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        "Refresh"
                    </button>
                </div>
            </div>

            <WarningBox message=error />

            <DataTable
                rows=items
                columns=price_test_columns()
                initial_sort=SortState::descending("start_date")
                search_placeholder="Search tests or groups..."
                loading=loading
            />

            <Show when=move || show_dialog.get()>
                <CreateTestDialog
                    on_submit=on_submit
                    on_close=Callback::new(move |_| set_show_dialog.set(false))
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::engine::compute_view;
    use crate::shared::data_table::{ColumnFilter, TableState};
    use chrono::NaiveDate;
    use contracts::domain::a002_test_group::aggregate::TestGroupId;
    use contracts::domain::a003_price_test::aggregate::PriceTestId;

    fn test(id: i64, start: (u32, u32), status: PriceTestStatus) -> PriceTest {
        let start = NaiveDate::from_ymd_opt(2024, start.0, start.1).unwrap();
        PriceTest {
            id: PriceTestId(id),
            name: format!("Test {}", id),
            group_id: TestGroupId(1),
            group_name: None,
            start_date: start,
            end_date: start + chrono::Duration::days(13),
            status,
            is_controlled_test: false,
            items: vec![],
        }
    }

    #[test]
    fn newest_start_first_and_status_filter() {
        let rows = vec![
            test(1, (1, 5), PriceTestStatus::Completed),
            test(2, (3, 1), PriceTestStatus::Running),
            test(3, (2, 10), PriceTestStatus::Completed),
        ];
        let columns = price_test_columns();
        let mut state = TableState::new(10, Some(SortState::descending("start_date")));
        let ids = |state: &TableState| -> Vec<i64> {
            compute_view(&rows, &columns, state)
                .rows
                .iter()
                .map(|&i| rows[i].id.value())
                .collect()
        };
        assert_eq!(ids(&state), vec![2, 3, 1]);

        state.upsert_filter(
            ColumnFilter::one_of("status", "Status", vec!["Completed".to_string()]).unwrap(),
        );
        assert_eq!(ids(&state), vec![3, 1]);
    }

    #[test]
    fn missing_group_name_sorts_last() {
        let mut named = test(1, (1, 1), PriceTestStatus::Planned);
        named.group_name = Some("Kitchen".into());
        let rows = vec![test(2, (1, 1), PriceTestStatus::Planned), named];
        let columns = price_test_columns();
        let state = TableState::new(10, Some(SortState::ascending("group")));
        let view = compute_view(&rows, &columns, &state);
        assert_eq!(view.rows, vec![1, 0]);
    }
}
