//! Header cell that toggles sorting on click.

use crate::shared::data_table::SortDirection;
use leptos::prelude::*;
use thaw::TableHeaderCell;

pub fn sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Ascending) => " ▲",
        Some(SortDirection::Descending) => " ▼",
        None => " ⇅",
    }
}

pub fn sort_class(direction: Option<SortDirection>) -> &'static str {
    if direction.is_some() {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

pub fn aria_sort(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Ascending) => "ascending",
        Some(SortDirection::Descending) => "descending",
        None => "none",
    }
}

#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    /// Current direction for this column, `None` when unsorted
    #[prop(into)]
    direction: Signal<Option<SortDirection>>,

    on_sort: Callback<()>,

    /// Extra classes, used for alignment
    #[prop(optional, into)]
    class: String,
) -> impl IntoView {
    view! {
        <TableHeaderCell resizable=false class=class attr:aria-sort=move || aria_sort(direction.get())>
            <button
                type="button"
                class="table__sortable-header"
                on:click=move |_| on_sort.run(())
            >
                {label}
                <span class=move || sort_class(direction.get())>
                    {move || sort_indicator(direction.get())}
                </span>
            </button>
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_follows_direction() {
        assert_eq!(sort_indicator(Some(SortDirection::Ascending)), " ▲");
        assert_eq!(sort_indicator(Some(SortDirection::Descending)), " ▼");
        assert_eq!(sort_indicator(None), " ⇅");
        assert_eq!(aria_sort(None), "none");
        assert!(sort_class(Some(SortDirection::Ascending)).ends_with("--active"));
    }
}
