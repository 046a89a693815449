use crate::domain::a002_test_group::api::{create_test_group, fetch_test_groups};
use crate::domain::a002_test_group::ui::add_dialog::AddGroupDialog;
use crate::shared::components::warning_box::WarningBox;
use crate::shared::data_table::{Align, CellValue, Column, DataRow, DataTable, FilterKind, SortState};
use crate::shared::icons::icon;
use crate::shared::request_guard::RequestGuard;
use contracts::domain::a002_test_group::aggregate::{NewTestGroup, TestGroup};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

impl DataRow for TestGroup {
    fn row_id(&self) -> String {
        self.id.to_string()
    }
}

fn group_columns() -> Vec<Column<TestGroup>> {
    vec![
        Column::new("name", "Name", |g: &TestGroup| CellValue::from(g.name.as_str()))
            .filter(FilterKind::Text)
            .render(|g| {
                let name = g.name.clone();
                view! { <span class="table__link">{name}</span> }.into_any()
            }),
        Column::new("item_count", "Products", |g: &TestGroup| CellValue::from(g.item_count))
            .filter(FilterKind::NumberRange)
            .align(Align::Right)
            .searchable(false),
    ]
}

pub fn group_path(group: &TestGroup) -> String {
    format!("/test-groups/{}", group.id)
}

#[component]
#[allow(non_snake_case)]
pub fn TestGroupList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<TestGroup>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (show_dialog, set_show_dialog) = signal(false);
    let guard = StoredValue::new(RequestGuard::for_component());
    let navigate = StoredValue::new_local(use_navigate());

    let fetch = move || {
        let ticket = guard.with_value(|g| g.begin());
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_test_groups().await;
            ticket.apply("test groups", || {
                match result {
                    Ok(groups) => {
                        set_items.set(groups);
                        set_error.set(None);
                    }
                    Err(e) => {
                        log::error!("failed to load test groups: {}", e);
                        set_error.set(Some(e.to_string()));
                    }
                }
                set_loading.set(false);
            });
        });
    };

    let on_submit = Callback::new(move |dto: NewTestGroup| {
        let closed = guard.with_value(|g| g.clone());
        wasm_bindgen_futures::spawn_local(async move {
            let result = create_test_group(&dto).await;
            if closed.is_closed() {
                return;
            }
            match result {
                Ok(_) => {
                    log::info!("created test group {:?}", dto.name);
                    fetch();
                }
                Err(e) => {
                    log::error!("failed to create test group: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    });

    let on_row_click = Callback::new(move |group: TestGroup| {
        navigate.with_value(|nav| nav(&group_path(&group), Default::default()));
    });

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Test Groups"</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| set_show_dialog.set(true)>
                        {icon("plus")}
                        "Add Group"
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
                columns=group_columns()
                on_row_click=on_row_click
                initial_sort=SortState::ascending("name")
                search_placeholder="Search groups..."
                loading=loading
            />

            <Show when=move || show_dialog.get()>
                <AddGroupDialog
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
    use contracts::domain::a002_test_group::aggregate::TestGroupId;

    #[test]
    fn row_click_target_is_the_details_route() {
        let group = TestGroup {
            id: TestGroupId(12),
            name: "Kitchen".into(),
            item_count: 4,
        };
        assert_eq!(group_path(&group), "/test-groups/12");
        assert_eq!(group.row_id(), "12");
    }
}
