use super::column::{Column, DataRow, FilterKind};
use super::filter::ColumnFilter;
use crate::shared::icons::icon;
use leptos::prelude::*;
use std::collections::BTreeSet;

/// "Add filter" popover: pick a filterable column, enter a value for its
/// filter kind and apply. Applying a filter on a column that already has one
/// replaces it.
#[component]
pub fn FilterBuilder<T>(
    columns: StoredValue<Vec<Column<T>>>,
    #[prop(into)]
    rows: Signal<Vec<T>>,
    on_apply: Callback<ColumnFilter>,
) -> impl IntoView
where
    T: DataRow,
{
    let filterable: Vec<(&'static str, &'static str)> = columns.with_value(|cols| {
        cols.iter()
            .filter(|c| c.filter.is_some())
            .map(|c| (c.id, c.header))
            .collect()
    });
    let Some(&(first_id, _)) = filterable.first() else {
        return ().into_any();
    };

    let is_open = RwSignal::new(false);
    let selected_column = RwSignal::new(first_id);
    let text_input = RwSignal::new(String::new());
    let min_input = RwSignal::new(String::new());
    let max_input = RwSignal::new(String::new());
    let chosen = RwSignal::new(BTreeSet::<String>::new());

    let reset_inputs = move || {
        text_input.set(String::new());
        min_input.set(String::new());
        max_input.set(String::new());
        chosen.set(BTreeSet::new());
    };

    let column_kind = Signal::derive(move || {
        let id = selected_column.get();
        columns.with_value(|cols| {
            cols.iter()
                .find(|c| c.id == id)
                .and_then(|c| c.filter.clone())
        })
    });

    let options = Signal::derive(move || {
        let id = selected_column.get();
        rows.with(|rows| {
            columns.with_value(|cols| {
                cols.iter()
                    .find(|c| c.id == id)
                    .map(|c| c.filter_options(rows))
                    .unwrap_or_default()
            })
        })
    });

    let can_apply = move || match column_kind.get() {
        Some(FilterKind::Text) => !text_input.with(|t| t.trim().is_empty()),
        Some(FilterKind::NumberRange) => {
            !min_input.with(|t| t.trim().is_empty()) || !max_input.with(|t| t.trim().is_empty())
        }
        Some(FilterKind::MultiSelect { .. }) => !chosen.with(|c| c.is_empty()),
        None => false,
    };

    let apply = move |_| {
        let id = selected_column.get_untracked();
        let Some((header, kind)) = columns.with_value(|cols| {
            cols.iter()
                .find(|c| c.id == id)
                .and_then(|c| c.filter.clone().map(|k| (c.header, k)))
        }) else {
            return;
        };
        let filter = match kind {
            FilterKind::Text => ColumnFilter::text(id, header, &text_input.get_untracked()),
            FilterKind::NumberRange => ColumnFilter::range(
                id,
                header,
                &min_input.get_untracked(),
                &max_input.get_untracked(),
            ),
            FilterKind::MultiSelect { .. } => {
                ColumnFilter::one_of(id, header, chosen.get_untracked())
            }
        };
        if let Some(filter) = filter {
            on_apply.run(filter);
            is_open.set(false);
            reset_inputs();
        }
    };

    let filterable = StoredValue::new(filterable);

    view! {
        <div class="filter-builder">
            <button
                class="button button--secondary"
                on:click=move |_| is_open.update(|open| *open = !*open)
            >
                {icon("filter")}
                "Add filter"
            </button>
            <Show when=move || is_open.get()>
                <div class="filter-builder__popover">
                    <label class="filter-builder__field">
                        "Column"
                        <select
                            prop:value=move || selected_column.get()
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                let found = filterable.with_value(|cols| {
                                    cols.iter().find(|(id, _)| *id == value).map(|&(id, _)| id)
                                });
                                if let Some(id) = found {
                                    selected_column.set(id);
                                    reset_inputs();
                                }
                            }
                        >
                            {filterable.with_value(|cols| cols.iter().map(|&(id, header)| view! {
                                <option value=id>{header}</option>
                            }).collect_view())}
                        </select>
                    </label>
                    {move || match column_kind.get() {
                        Some(FilterKind::Text) => view! {
                            <input
                                type="text"
                                class="filter-builder__input"
                                placeholder="Contains..."
                                prop:value=move || text_input.get()
                                on:input=move |ev| text_input.set(event_target_value(&ev))
                            />
                        }.into_any(),
                        Some(FilterKind::NumberRange) => view! {
                            <div class="filter-builder__range">
                                <input
                                    type="number"
                                    class="filter-builder__input"
                                    placeholder="Min"
                                    prop:value=move || min_input.get()
                                    on:input=move |ev| min_input.set(event_target_value(&ev))
                                />
                                <span>"–"</span>
                                <input
                                    type="number"
                                    class="filter-builder__input"
                                    placeholder="Max"
                                    prop:value=move || max_input.get()
                                    on:input=move |ev| max_input.set(event_target_value(&ev))
                                />
                            </div>
                        }.into_any(),
                        Some(FilterKind::MultiSelect { .. }) => view! {
                            <div class="filter-builder__options">
                                {move || options.get().into_iter().map(|option| {
                                    let value = option.clone();
                                    let checked_value = option.clone();
                                    view! {
                                        <label class="filter-builder__option">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || chosen.with(|c| c.contains(&checked_value))
                                                on:change=move |ev| {
                                                    let checked = event_target_checked(&ev);
                                                    chosen.update(|c| {
                                                        if checked {
                                                            c.insert(value.clone());
                                                        } else {
                                                            c.remove(&value);
                                                        }
                                                    });
                                                }
                                            />
                                            {option}
                                        </label>
                                    }
                                }).collect_view()}
                            </div>
                        }.into_any(),
                        None => ().into_any(),
                    }}
                    <div class="filter-builder__actions">
                        <button
                            class="button button--ghost"
                            on:click=move |_| {
                                is_open.set(false);
                                reset_inputs();
                            }
                        >
                            "Cancel"
                        </button>
                        <button
                            class="button button--primary"
                            disabled=move || !can_apply()
                            on:click=apply
                        >
                            "Apply"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
    .into_any()
}
