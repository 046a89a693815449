use crate::domain::a001_product::ui::columns::product_columns;
use crate::domain::a002_test_group::api::fetch_test_group;
use crate::shared::components::warning_box::WarningBox;
use crate::shared::data_table::{DataTable, SortState};
use crate::shared::icons::icon;
use crate::shared::request_guard::RequestGuard;
use contracts::domain::a002_test_group::aggregate::{TestGroupDetail, TestGroupId};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use thaw::{Badge, BadgeAppearance, BadgeColor};

/// Group id from the `:id` route segment
pub fn parse_group_id(raw: Option<String>) -> Option<TestGroupId> {
    raw?.trim().parse::<i64>().ok().map(TestGroupId)
}

#[component]
#[allow(non_snake_case)]
pub fn TestGroupDetails() -> impl IntoView {
    let params = use_params_map();
    let (group, set_group) = signal::<Option<TestGroupDetail>>(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let guard = StoredValue::new(RequestGuard::for_component());

    let group_id = Memo::new(move |_| parse_group_id(params.with(|p| p.get("id"))));

    // reloads when the route switches to another group
    Effect::new(move |_| {
        let Some(id) = group_id.get() else {
            set_group.set(None);
            set_error.set(Some("Unknown test group.".to_string()));
            return;
        };
        let ticket = guard.with_value(|g| g.begin());
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_test_group(id).await;
            ticket.apply("test group details", || {
                match result {
                    Ok(detail) => {
                        set_group.set(Some(detail));
                        set_error.set(None);
                    }
                    Err(e) => {
                        log::error!("failed to load test group {}: {}", id, e);
                        set_error.set(Some(e.to_string()));
                    }
                }
                set_loading.set(false);
            });
        });
    });

    let products = Signal::derive(move || {
        group.with(|g| g.as_ref().map(|g| g.products.clone()).unwrap_or_default())
    });

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <a href="/test-groups" class="header__back">
                        {icon("chevron-left")}
                        "Test Groups"
                    </a>
                    <h1 class="header__title">
                        {move || group.with(|g| g.as_ref().map(|g| g.name.clone()).unwrap_or_default())}
                    </h1>
                    {move || group.with(|g| g.as_ref().map(|g| g.is_active)).map(|active| {
                        let (color, label) = if active {
                            (BadgeColor::Success, "Active")
                        } else {
                            (BadgeColor::Subtle, "Inactive")
                        };
                        view! {
                            <Badge appearance=BadgeAppearance::Tint color=color>{label}</Badge>
                        }
                    })}
                </div>
                <div class="header__actions">
                    <span class="header__subtitle">
                        {move || format!("{} products", products.with(|p| p.len()))}
                    </span>
                </div>
            </div>

            <WarningBox message=error />

            <DataTable
                rows=products
                columns=product_columns()
                initial_sort=SortState::ascending("name")
                search_placeholder="Search group products..."
                loading=loading
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::engine::{compute_view, TableState};
    use crate::shared::data_table::table::{placeholder_message, placeholder_span};

    #[test]
    fn route_id_must_be_numeric() {
        assert_eq!(parse_group_id(Some("42".into())), Some(TestGroupId(42)));
        assert_eq!(parse_group_id(Some("abc".into())), None);
        assert_eq!(parse_group_id(None), None);
    }

    #[test]
    fn empty_group_renders_single_no_results_row() {
        let columns = product_columns();
        let view = compute_view(&[], &columns, &TableState::new(10, Some(SortState::ascending("name"))));
        assert_eq!(view.total_rows(), 0);
        assert_eq!(placeholder_message(false, view.page_rows.len()), Some("No results."));
        assert_eq!(placeholder_span(columns.len(), false), 5);
    }
}
