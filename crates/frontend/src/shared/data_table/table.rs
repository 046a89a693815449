use super::column::{Column, DataRow};
use super::engine::{compute_view, SortState, TableState, TableView, PAGE_SIZE_OPTIONS};
use super::filter::ColumnFilter;
use super::filter_builder::FilterBuilder;
use crate::shared::components::filter_tag::FilterTag;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{SortableHeaderCell, TableHeaderCheckbox};
use crate::shared::components::table_checkbox::TableCheckbox;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::{Table, TableBody, TableCell, TableHeader, TableHeaderCell, TableRow};

/// Text of the single body row shown instead of data, if any
pub fn placeholder_message(loading: bool, visible_rows: usize) -> Option<&'static str> {
    if loading {
        Some("Loading...")
    } else if visible_rows == 0 {
        Some("No results.")
    } else {
        None
    }
}

/// Columns the placeholder row spans, checkbox column included
pub fn placeholder_span(column_count: usize, enable_selection: bool) -> usize {
    column_count + usize::from(enable_selection)
}

#[component]
pub fn DataTable<T>(
    /// Records to show; replaced wholesale when the page reloads
    #[prop(into)]
    rows: Signal<Vec<T>>,

    columns: Vec<Column<T>>,

    /// Adds the checkbox column and the selection summary
    #[prop(optional)]
    enable_selection: bool,

    /// Receives the full list of selected records after every change
    #[prop(optional)]
    on_selection_change: Option<Callback<Vec<T>>>,

    #[prop(optional)]
    on_row_click: Option<Callback<T>>,

    #[prop(optional)]
    initial_sort: Option<SortState>,

    /// Defaults to 10/20/30/40/50
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,

    #[prop(optional, into)]
    search_placeholder: Option<String>,

    #[prop(optional, into)]
    loading: Signal<bool>,
) -> impl IntoView
where
    T: DataRow,
{
    let page_size_options = page_size_options.unwrap_or_else(|| PAGE_SIZE_OPTIONS.to_vec());
    let initial_page_size = page_size_options
        .first()
        .copied()
        .unwrap_or(PAGE_SIZE_OPTIONS[0]);
    let column_span = placeholder_span(columns.len(), enable_selection);
    let columns = StoredValue::new(columns);
    let state = RwSignal::new(TableState::new(initial_page_size, initial_sort));

    let view_state: Memo<TableView> = Memo::new(move |_| {
        rows.with(|rows| columns.with_value(|cols| state.with(|s| compute_view(rows, cols, s))))
    });

    let page_items = Signal::derive(move || {
        let view = view_state.get();
        rows.with(|rows| {
            view.page_rows
                .iter()
                .filter_map(|&i| rows.get(i).cloned())
                .collect::<Vec<T>>()
        })
    });
    let page_ids = Memo::new(move |_| {
        page_items.with(|items| items.iter().map(|row| row.row_id()).collect::<Vec<_>>())
    });
    let page_selection = Signal::derive(move || {
        page_ids.with(|ids| state.with(|s| s.page_selection(ids)))
    });
    let selected_count = Signal::derive(move || state.with(|s| s.selection.len()));

    let notify_selection = move || {
        if let Some(callback) = on_selection_change {
            let selected = rows.with_untracked(|rows| state.with_untracked(|s| s.selected_rows(rows)));
            callback.run(selected);
        }
    };

    let on_filter_apply = Callback::new(move |filter: ColumnFilter| {
        log::debug!("data table: filter on '{}' set to {:?}", filter.column_id, filter.value);
        state.update(|s| s.upsert_filter(filter));
    });

    let on_page_change = Callback::new(move |page: usize| {
        let page_count = view_state.with_untracked(|v| v.page_count);
        state.update(|s| s.go_to_page(page, page_count));
    });

    let on_page_size_change = Callback::new(move |size: usize| {
        // the pipeline may have clamped the index; start from what is shown
        let shown = view_state.with_untracked(|v| v.page_index);
        state.update(|s| {
            s.page_index = shown;
            s.set_page_size(size);
        });
    });

    let on_select_page = Callback::new(move |checked: bool| {
        let ids = page_ids.get_untracked();
        state.update(|s| s.set_page_selected(&ids, checked));
        notify_selection();
    });

    let search_placeholder = search_placeholder.unwrap_or_else(|| "Search...".to_string());

    let header_cells = columns.with_value(|cols| {
        cols.iter()
            .map(|column| {
                let id = column.id;
                let header = column.header;
                let class = column.align.class();
                if column.sortable {
                    view! {
                        <SortableHeaderCell
                            label=header
                            class=class
                            direction=Signal::derive(move || state.with(|s| s.sort_direction(id)))
                            on_sort=Callback::new(move |_| state.update(|s| s.toggle_sort(id)))
                        />
                    }
                    .into_any()
                } else {
                    view! {
                        <TableHeaderCell resizable=false class=class>{header}</TableHeaderCell>
                    }
                    .into_any()
                }
            })
            .collect_view()
    });

    let render_row = move |row: T| {
        let id = row.row_id();
        let checked_id = id.clone();
        let is_selected = Signal::derive(move || state.with(|s| s.is_selected(&checked_id)));
        let cells = columns.with_value(|cols| {
            cols.iter()
                .map(|column| {
                    let class = column.align.class();
                    let cell = column.render_cell(&row);
                    view! { <TableCell class=class>{cell}</TableCell> }
                })
                .collect_view()
        });
        let clicked = row.clone();
        view! {
            <TableRow
                class:data-table__row--selected=move || is_selected.get()
                class:data-table__row--clickable=on_row_click.is_some()
                on:click=move |_| {
                    if let Some(callback) = on_row_click {
                        callback.run(clicked.clone());
                    }
                }
            >
                {enable_selection.then(|| view! {
                    <TableCheckbox
                        checked=is_selected
                        on_change=Callback::new(move |checked: bool| {
                            state.update(|s| s.set_row_selected(&id, checked));
                            notify_selection();
                        })
                    />
                })}
                {cells}
            </TableRow>
        }
    };

    let body = move || {
        let visible = page_items.with(|items| items.len());
        match placeholder_message(loading.get(), visible) {
            Some(message) => view! {
                <TableRow>
                    <TableCell attr:colspan=column_span.to_string() class="data-table__empty">
                        {message}
                    </TableCell>
                </TableRow>
            }
            .into_any(),
            None => page_items.get().into_iter().map(render_row).collect_view().into_any(),
        }
    };

    view! {
        <div class="data-table">
            <div class="data-table__toolbar">
                <div class="data-table__search">
                    {icon("search")}
                    <input
                        type="search"
                        class="data-table__search-input"
                        placeholder=search_placeholder
                        aria-label="Search all columns"
                        prop:value=move || state.with(|s| s.global_filter.clone())
                        on:input=move |ev| {
                            let query = event_target_value(&ev);
                            state.update(|s| s.set_global_filter(query));
                        }
                    />
                </div>
                <FilterBuilder columns=columns rows=rows on_apply=on_filter_apply />
                <Show when=move || state.with(|s| s.active_filter_count() > 0)>
                    <div class="data-table__filter-tags">
                        {move || state.with(|s| s.filters.clone()).into_iter().map(|filter| {
                            let column_id = filter.column_id.clone();
                            view! {
                                <FilterTag
                                    label=filter.label
                                    on_remove=Callback::new(move |_| {
                                        state.update(|s| s.remove_filter(&column_id));
                                    })
                                />
                            }
                        }).collect_view()}
                        <button
                            class="button button--ghost data-table__clear-filters"
                            on:click=move |_| state.update(|s| s.clear_filters())
                        >
                            "Clear filters"
                        </button>
                    </div>
                </Show>
            </div>

            <Show when=move || { enable_selection && selected_count.get() > 0 }>
                <div class="data-table__selection">
                    <span>{move || format!("{} selected", selected_count.get())}</span>
                    <button
                        class="button button--ghost"
                        on:click=move |_| {
                            state.update(|s| s.clear_selection());
                            notify_selection();
                        }
                    >
                        "Clear selection"
                    </button>
                </div>
            </Show>

            <div class="table-wrapper">
                <Table>
                    <TableHeader>
                        <TableRow>
                            {enable_selection.then(|| view! {
                                <TableHeaderCheckbox
                                    state=page_selection
                                    on_change=on_select_page
                                    disabled=Signal::derive(move || page_ids.with(|ids| ids.is_empty()))
                                />
                            })}
                            {header_cells}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {body}
                    </TableBody>
                </Table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || view_state.with(|v| v.page_index))
                total_pages=Signal::derive(move || view_state.with(|v| v.page_count))
                total_count=Signal::derive(move || view_state.with(|v| v.total_rows()))
                page_size=Signal::derive(move || state.with(|s| s.page_size))
                on_page_change=on_page_change
                on_page_size_change=on_page_size_change
                page_size_options=page_size_options
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_view_gets_no_results_row() {
        assert_eq!(placeholder_message(false, 0), Some("No results."));
        assert_eq!(placeholder_message(false, 3), None);
    }

    #[test]
    fn loading_wins_over_rows() {
        assert_eq!(placeholder_message(true, 0), Some("Loading..."));
        assert_eq!(placeholder_message(true, 5), Some("Loading..."));
    }

    #[test]
    fn placeholder_spans_selection_column() {
        assert_eq!(placeholder_span(4, false), 4);
        assert_eq!(placeholder_span(4, true), 5);
    }
}
